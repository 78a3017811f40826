//! Shape classification for traced region boundaries.
//!
//! The classifier is an ordered cascade, short-circuiting on the first
//! family that fits: circle, quadrilateral (with a rectangle sub-type),
//! convex polygon, and finally a minimal bounding quadrilateral. The
//! fallback is surfaced as its own [`Shape::BoundingQuad`] variant so a
//! boundary that fits no family is never mistaken for a true
//! quadrilateral. A boundary no family matches at all is `None`, which is a
//! normal outcome rather than an error.

mod hull;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use blobshape_core::Point;

use hull::{bounding_quad, line_distance, simplify_closed};

/// Classified region outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle {
        center: Point2<f32>,
        radius: f32,
    },
    Rectangle {
        corners: [Point; 4],
    },
    Quadrilateral {
        corners: [Point; 4],
    },
    /// Convex polygon that is not a quadrilateral.
    Polygon {
        corners: Vec<Point>,
    },
    /// Fallback: minimal bounding quadrilateral of a boundary no other
    /// family matched. Approximate by construction.
    BoundingQuad {
        corners: [Point; 4],
    },
}

impl Shape {
    /// Corner points for the polygonal variants; `None` for circles.
    pub fn corner_points(&self) -> Option<&[Point]> {
        match self {
            Shape::Circle { .. } => None,
            Shape::Rectangle { corners }
            | Shape::Quadrilateral { corners }
            | Shape::BoundingQuad { corners } => Some(corners),
            Shape::Polygon { corners } => Some(corners),
        }
    }
}

/// Tolerances for the classification cascade.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ShapeClassifierParams {
    /// Maximum radial deviation from the mean radius, relative to the mean
    /// radius, for the circle test.
    pub circle_tolerance: f32,
    /// Minimum boundary length for the circle test; below this, radial
    /// statistics of a rasterized outline are meaningless.
    pub circle_min_points: usize,
    /// Corner simplification threshold as a fraction of the boundary
    /// perimeter.
    pub simplify_epsilon_rel: f32,
    /// Lower bound on the simplification threshold in pixels, so short
    /// boundaries are not over-segmented by rasterization noise.
    pub simplify_epsilon_min: f32,
    /// Rectangle sub-test: maximum relative length mismatch between
    /// opposite sides.
    pub side_ratio_tolerance: f32,
    /// Rectangle sub-test: maximum deviation of corner angles from 90
    /// degrees.
    pub right_angle_tolerance_deg: f32,
    /// Convexity test: wrong-direction turns whose normalized cross
    /// product stays below this magnitude are treated as collinear noise.
    pub convexity_tolerance: f32,
}

impl Default for ShapeClassifierParams {
    fn default() -> Self {
        Self {
            circle_tolerance: 0.1,
            circle_min_points: 8,
            simplify_epsilon_rel: 0.02,
            simplify_epsilon_min: 2.0,
            side_ratio_tolerance: 0.2,
            right_angle_tolerance_deg: 12.0,
            convexity_tolerance: 0.08,
        }
    }
}

/// Classify a closed boundary. Returns `None` for degenerate or
/// unmatchable boundaries; never panics on caller geometry.
pub fn classify(boundary: &[Point], params: &ShapeClassifierParams) -> Option<Shape> {
    if boundary.len() < 3 {
        return None;
    }

    if let Some(circle) = fit_circle(boundary, params) {
        return Some(circle);
    }

    let epsilon = (params.simplify_epsilon_rel * closed_perimeter(boundary))
        .max(params.simplify_epsilon_min);
    let corners = simplify_closed(boundary, epsilon);

    if corners.len() >= 4 {
        if let Some(quad) = reduce_to_quad(&corners, epsilon) {
            return Some(if is_rectangle(&quad, params) {
                Shape::Rectangle { corners: quad }
            } else {
                Shape::Quadrilateral { corners: quad }
            });
        }
    }

    if corners.len() >= 3 && is_convex(&corners, params) {
        return Some(Shape::Polygon { corners });
    }

    bounding_quad(boundary).map(|corners| Shape::BoundingQuad { corners })
}

fn closed_perimeter(boundary: &[Point]) -> f32 {
    let mut len = 0.0;
    for i in 0..boundary.len() {
        let next = boundary[(i + 1) % boundary.len()];
        len += boundary[i].distance(&next);
    }
    len
}

/// Circle test: centroid as center, mean radial distance as radius, accept
/// when no boundary point deviates from the mean radius by more than the
/// relative tolerance.
fn fit_circle(boundary: &[Point], params: &ShapeClassifierParams) -> Option<Shape> {
    if boundary.len() < params.circle_min_points {
        return None;
    }
    let n = boundary.len() as f32;
    let cx = boundary.iter().map(|p| p.x as f32).sum::<f32>() / n;
    let cy = boundary.iter().map(|p| p.y as f32).sum::<f32>() / n;

    let radii: Vec<f32> = boundary
        .iter()
        .map(|p| ((p.x as f32 - cx).powi(2) + (p.y as f32 - cy).powi(2)).sqrt())
        .collect();
    let mean = radii.iter().sum::<f32>() / n;
    if mean <= f32::EPSILON {
        return None;
    }

    let max_dev = radii
        .iter()
        .map(|r| (r - mean).abs())
        .fold(0.0f32, f32::max);
    (max_dev / mean <= params.circle_tolerance).then(|| Shape::Circle {
        center: Point2::new(cx, cy),
        radius: mean,
    })
}

/// Iterative corner reduction: drop the vertex whose removal deviates least
/// from the chord of its neighbors, as long as that deviation stays within
/// `epsilon`, until exactly 4 corners remain.
fn reduce_to_quad(corners: &[Point], epsilon: f32) -> Option<[Point; 4]> {
    let mut pts = corners.to_vec();
    while pts.len() > 4 {
        let n = pts.len();
        let (idx, dev) = (0..n)
            .map(|i| {
                let prev = pts[(i + n - 1) % n];
                let next = pts[(i + 1) % n];
                (i, line_distance(pts[i], prev, next))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        if dev > epsilon {
            return None;
        }
        pts.remove(idx);
    }
    (pts.len() == 4).then(|| [pts[0], pts[1], pts[2], pts[3]])
}

/// Rectangle sub-test: opposite sides nearly equal, corner angles near 90
/// degrees.
fn is_rectangle(quad: &[Point; 4], params: &ShapeClassifierParams) -> bool {
    let sides: Vec<(f32, f32)> = (0..4)
        .map(|i| {
            let a = quad[i];
            let b = quad[(i + 1) % 4];
            ((b.x - a.x) as f32, (b.y - a.y) as f32)
        })
        .collect();
    let lengths: Vec<f32> = sides.iter().map(|(x, y)| (x * x + y * y).sqrt()).collect();
    if lengths.iter().any(|&l| l <= f32::EPSILON) {
        return false;
    }

    for (a, b) in [(0usize, 2usize), (1, 3)] {
        let longer = lengths[a].max(lengths[b]);
        if (lengths[a] - lengths[b]).abs() / longer > params.side_ratio_tolerance {
            return false;
        }
    }

    // Adjacent sides perpendicular: |cos| of their angle below sin(tol).
    let cos_limit = params.right_angle_tolerance_deg.to_radians().sin();
    for i in 0..4 {
        let j = (i + 1) % 4;
        let dot = sides[i].0 * sides[j].0 + sides[i].1 * sides[j].1;
        if (dot / (lengths[i] * lengths[j])).abs() > cos_limit {
            return false;
        }
    }
    true
}

/// Convexity: every turn goes the same way; opposite turns are tolerated
/// only while their normalized cross product stays within the tolerance.
fn is_convex(corners: &[Point], params: &ShapeClassifierParams) -> bool {
    let n = corners.len();
    let mut min_turn = 0.0f32;
    let mut max_turn = 0.0f32;
    for i in 0..n {
        let a = corners[i];
        let b = corners[(i + 1) % n];
        let c = corners[(i + 2) % n];
        let (ux, uy) = ((b.x - a.x) as f32, (b.y - a.y) as f32);
        let (vx, vy) = ((c.x - b.x) as f32, (c.y - b.y) as f32);
        let lu = (ux * ux + uy * uy).sqrt();
        let lv = (vx * vx + vy * vy).sqrt();
        if lu <= f32::EPSILON || lv <= f32::EPSILON {
            continue;
        }
        let turn = (ux * vy - uy * vx) / (lu * lv);
        min_turn = min_turn.min(turn);
        max_turn = max_turn.max(turn);
    }
    min_turn >= -params.convexity_tolerance || max_turn <= params.convexity_tolerance
}
