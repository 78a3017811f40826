//! Polygonal helpers for the classifier: perpendicular distance,
//! Douglas-Peucker simplification, monotone-chain convex hull, and the
//! furthest-point bounding quadrilateral used as the classification
//! fallback.

use blobshape_core::Point;

/// Distance from `p` to the infinite line through `a` and `b`.
/// Falls back to point distance when `a == b`.
pub(crate) fn line_distance(p: Point, a: Point, b: Point) -> f32 {
    let len_sq = a.distance_sq(&b);
    if len_sq == 0 {
        return p.distance(&a);
    }
    let cross = (b.x - a.x) as i64 * (p.y - a.y) as i64 - (b.y - a.y) as i64 * (p.x - a.x) as i64;
    cross.abs() as f32 / (len_sq as f32).sqrt()
}

fn douglas_peucker_into(chain: &[Point], epsilon: f32, out: &mut Vec<Point>) {
    let (first, last) = (chain[0], chain[chain.len() - 1]);
    let mut max_dist = 0.0f32;
    let mut max_idx = 0usize;
    for (i, &p) in chain.iter().enumerate().skip(1).take(chain.len() - 2) {
        let d = line_distance(p, first, last);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }
    if max_dist > epsilon {
        douglas_peucker_into(&chain[..=max_idx], epsilon, out);
        out.pop(); // split point would be emitted twice
        douglas_peucker_into(&chain[max_idx..], epsilon, out);
    } else {
        out.push(first);
        out.push(last);
    }
}

/// Ramer-Douglas-Peucker simplification of an open chain; endpoints are
/// always kept.
pub(crate) fn douglas_peucker(chain: &[Point], epsilon: f32) -> Vec<Point> {
    if chain.len() < 3 {
        return chain.to_vec();
    }
    let mut out = Vec::new();
    douglas_peucker_into(chain, epsilon, &mut out);
    out
}

/// Simplify a closed boundary to its dominant corners.
///
/// The boundary is split at two anchor points (the start and the point
/// farthest from it), each half is simplified independently, and the halves
/// are rejoined without duplicating the anchors. Returns corners in
/// boundary order.
pub(crate) fn simplify_closed(boundary: &[Point], epsilon: f32) -> Vec<Point> {
    if boundary.len() < 3 {
        return boundary.to_vec();
    }
    let start = boundary[0];
    let split = boundary
        .iter()
        .enumerate()
        .max_by_key(|&(_, p)| start.distance_sq(p))
        .map(|(i, _)| i)
        .unwrap_or(0);
    if split == 0 {
        // All points coincide with the start.
        return vec![start];
    }

    let first_half = douglas_peucker(&boundary[..=split], epsilon);
    let mut second: Vec<Point> = boundary[split..].to_vec();
    second.push(start);
    let second_half = douglas_peucker(&second, epsilon);

    let mut corners = first_half;
    corners.extend_from_slice(&second_half[1..second_half.len() - 1]);
    corners.dedup();
    corners
}

#[inline]
fn cross(o: Point, a: Point, b: Point) -> i64 {
    (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
}

/// Andrew's monotone chain. Returns the hull in clockwise screen order
/// (y grows downward); collinear points are dropped. Fewer than 3 distinct
/// non-collinear input points yield a degenerate (shorter) result.
pub(crate) fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.sort_by_key(|p| (p.x, p.y));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    // Counter-clockwise in y-up math coords is clockwise on screen.
    lower.extend(upper);
    lower
}

/// Minimal bounding quadrilateral by direction sweep: the two farthest hull
/// points form a diagonal, and the farthest point on each side of that
/// diagonal completes the quad. Returns corners in perimeter order, or
/// `None` when the cloud is too flat to span four distinct corners.
pub(crate) fn bounding_quad(points: &[Point]) -> Option<[Point; 4]> {
    let hull = convex_hull(points);
    if hull.len() < 4 {
        return None;
    }

    let mut best = (0usize, 1usize, 0i64);
    for i in 0..hull.len() {
        for j in (i + 1)..hull.len() {
            let d = hull[i].distance_sq(&hull[j]);
            if d > best.2 {
                best = (i, j, d);
            }
        }
    }
    let (p, q) = (hull[best.0], hull[best.1]);

    let mut left: Option<(Point, i64)> = None;
    let mut right: Option<(Point, i64)> = None;
    for &r in &hull {
        let c = cross(p, q, r);
        if c > 0 && left.is_none_or(|(_, d)| c > d) {
            left = Some((r, c));
        } else if c < 0 && right.is_none_or(|(_, d)| -c > d) {
            right = Some((r, -c));
        }
    }

    let (l, _) = left?;
    let (r, _) = right?;
    Some([p, l, q, r])
}
