//! Outer boundary tracing for labeled regions.
//!
//! Moore-neighbor contour following over the label map, starting at the
//! blob's raster seed and walking clockwise. The walk terminates when it is
//! about to repeat its first transition (start pixel to second pixel), which
//! is robust for one-pixel-wide appendages where the plain
//! revisit-the-start criterion loops.

use blobshape_core::Point;

use crate::blobs::{Blob, Segmentation};

/// Moore neighborhood in clockwise screen order (y grows downward),
/// starting at the western neighbor.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

#[inline]
fn neighbor_index(from: Point, to: Point) -> usize {
    let d = (to.x - from.x, to.y - from.y);
    NEIGHBORS.iter().position(|&o| o == d).unwrap_or(0)
}

/// Trace the ordered outer boundary of `blob` as a simple closed polyline
/// in clockwise orientation.
///
/// Degenerate regions producing fewer than 3 boundary points yield an
/// empty vector, which the classifier treats as unclassifiable.
pub fn trace_boundary(seg: &Segmentation, blob: &Blob) -> Vec<Point> {
    let inside = |p: Point| seg.label_at(p.x, p.y) == blob.label;

    let start = blob.seed;
    if !inside(start) {
        return Vec::new();
    }

    // The seed is the first blob pixel in raster order, so its western
    // neighbor can never belong to the blob.
    let initial_backtrack = Point::new(start.x - 1, start.y);

    let mut boundary = vec![start];
    let mut current = start;
    let mut backtrack = initial_backtrack;
    let mut first_edge: Option<(Point, Point)> = None;

    // Upper bound on boundary length; guards against a walk that never
    // meets the stopping criterion.
    let max_steps = 4 * seg.width * seg.height + 8;

    for _ in 0..max_steps {
        let from = neighbor_index(current, backtrack);
        let mut next = None;
        let mut previous = backtrack;
        for step in 0..8 {
            let (dx, dy) = NEIGHBORS[(from + step) % 8];
            let candidate = Point::new(current.x + dx, current.y + dy);
            if inside(candidate) {
                next = Some((candidate, previous));
                break;
            }
            previous = candidate;
        }

        let Some((next_pixel, next_backtrack)) = next else {
            // Isolated pixel: no foreground neighbor at all.
            break;
        };

        match first_edge {
            Some(edge) if edge == (current, next_pixel) => break,
            None => first_edge = Some((current, next_pixel)),
            _ => {}
        }

        boundary.push(next_pixel);
        current = next_pixel;
        backtrack = next_backtrack;
    }

    // The final step re-enters the start pixel before the walk stops.
    if boundary.len() > 1 && boundary.last() == Some(&start) {
        boundary.pop();
    }

    if boundary.len() < 3 {
        return Vec::new();
    }
    boundary
}
