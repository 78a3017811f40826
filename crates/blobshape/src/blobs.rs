//! Connected-component extraction over a color-filtered frame.
//!
//! Two-pass labeling with a union-find over provisional labels. Any pixel
//! that is not pure black counts as foreground, which matches the output
//! contract of [`crate::filter::apply_in_place`].

use log::debug;
use serde::{Deserialize, Serialize};

use blobshape_core::{Point, Rect, Rgb, RgbImageView};

/// Inclusive bounding-box size limits for emitted blobs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BlobSizeFilter {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for BlobSizeFilter {
    fn default() -> Self {
        Self {
            min_width: 5,
            min_height: 5,
            max_width: u32::MAX,
            max_height: u32::MAX,
        }
    }
}

impl BlobSizeFilter {
    #[inline]
    fn accepts(&self, rect: &Rect) -> bool {
        rect.width >= self.min_width
            && rect.width <= self.max_width
            && rect.height >= self.min_height
            && rect.height <= self.max_height
    }
}

/// One connected foreground region. Lives for a single frame pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    /// Compact label, also the region id in [`Segmentation::labels`].
    pub label: u32,
    /// Tight bounding box.
    pub rect: Rect,
    /// Number of pixels in the region.
    pub pixel_count: u32,
    /// First region pixel in raster order (topmost, then leftmost). Used as
    /// the contour tracing seed.
    pub seed: Point,
}

/// Label map plus the blobs that passed the size filter.
///
/// `labels` is row-major, same dimensions as the source frame; `0` is
/// background, blob pixels carry their compact label. Labels of regions
/// rejected by the size filter remain in the map but have no [`Blob`] entry.
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<u32>,
    pub blobs: Vec<Blob>,
}

impl Segmentation {
    #[inline]
    pub fn label_at(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.labels[y as usize * self.width + x as usize]
    }
}

fn find_root(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        let grand = parent[parent[x as usize] as usize];
        parent[x as usize] = grand;
        x = grand;
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find_root(parent, a);
    let rb = find_root(parent, b);
    if ra != rb {
        // Smaller root wins so earlier raster labels stay roots.
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi as usize] = lo;
    }
}

struct BlobStats {
    min: Point,
    max: Point,
    count: u32,
    seed: Point,
}

/// Label 8-connected foreground regions and keep those whose bounding box
/// satisfies `filter` (bounds inclusive).
///
/// 8-connectivity merges diagonally touching pixel runs into one region,
/// which keeps thin slanted outlines intact. Blobs are emitted in
/// first-encounter order of a single top-to-bottom, left-to-right raster
/// scan, so output order is deterministic for a given frame.
pub fn find_blobs(view: &RgbImageView<'_>, filter: &BlobSizeFilter) -> Segmentation {
    let (w, h) = (view.width, view.height);
    let mut provisional = vec![0u32; w * h];
    // parent[0] is the background sentinel.
    let mut parent: Vec<u32> = vec![0];

    // First pass: provisional labels, unions across W/NW/N/NE neighbors.
    for y in 0..h {
        for x in 0..w {
            if view.pixel(x, y) == Rgb::BLACK {
                continue;
            }
            let idx = y * w + x;
            let mut label = 0u32;
            let neighbors = [
                (x.wrapping_sub(1), y),
                (x.wrapping_sub(1), y.wrapping_sub(1)),
                (x, y.wrapping_sub(1)),
                (x + 1, y.wrapping_sub(1)),
            ];
            for (nx, ny) in neighbors {
                if nx >= w || ny >= h {
                    continue;
                }
                let nl = provisional[ny * w + nx];
                if nl == 0 {
                    continue;
                }
                if label == 0 {
                    label = nl;
                } else {
                    union(&mut parent, label, nl);
                }
            }
            if label == 0 {
                label = parent.len() as u32;
                parent.push(label);
            }
            provisional[idx] = label;
        }
    }

    // Second pass: resolve roots, compact labels in raster order of first
    // encounter, and accumulate per-blob stats.
    let mut compact_of_root = vec![0u32; parent.len()];
    let mut stats: Vec<BlobStats> = Vec::new();
    let mut labels = vec![0u32; w * h];

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let prov = provisional[idx];
            if prov == 0 {
                continue;
            }
            let root = find_root(&mut parent, prov) as usize;
            let mut compact = compact_of_root[root];
            let p = Point::new(x as i32, y as i32);
            if compact == 0 {
                stats.push(BlobStats {
                    min: p,
                    max: p,
                    count: 0,
                    seed: p,
                });
                compact = stats.len() as u32;
                compact_of_root[root] = compact;
            }
            let s = &mut stats[compact as usize - 1];
            s.min.x = s.min.x.min(p.x);
            s.min.y = s.min.y.min(p.y);
            s.max.x = s.max.x.max(p.x);
            s.max.y = s.max.y.max(p.y);
            s.count += 1;
            labels[idx] = compact;
        }
    }

    let blobs: Vec<Blob> = stats
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            let rect = Rect::from_corners(s.min, s.max);
            filter.accepts(&rect).then_some(Blob {
                label: i as u32 + 1,
                rect,
                pixel_count: s.count,
                seed: s.seed,
            })
        })
        .collect();

    debug!(
        "segmentation: {} regions labeled, {} within size limits",
        stats.len(),
        blobs.len()
    );

    Segmentation {
        width: w,
        height: h,
        labels,
        blobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobshape_core::RgbImage;

    const FG: Rgb = Rgb::new(200, 40, 40);

    fn frame_with_rects(w: usize, h: usize, rects: &[Rect]) -> RgbImage {
        let mut img = RgbImage::new(w, h);
        for r in rects {
            for y in r.y..r.y + r.height as i32 {
                for x in r.x..r.x + r.width as i32 {
                    img.set_pixel(x as usize, y as usize, FG);
                }
            }
        }
        img
    }

    fn accept_all() -> BlobSizeFilter {
        BlobSizeFilter {
            min_width: 1,
            min_height: 1,
            max_width: u32::MAX,
            max_height: u32::MAX,
        }
    }

    #[test]
    fn all_background_yields_no_blobs() {
        let img = RgbImage::new(16, 16);
        let seg = find_blobs(&img.as_view(), &accept_all());
        assert!(seg.blobs.is_empty());
        assert!(seg.labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn separate_regions_get_distinct_labels_in_raster_order() {
        let img = frame_with_rects(30, 30, &[Rect::new(20, 2, 6, 6), Rect::new(2, 10, 6, 6)]);
        let seg = find_blobs(&img.as_view(), &accept_all());
        assert_eq!(seg.blobs.len(), 2);
        // Top-most region comes first regardless of x.
        assert_eq!(seg.blobs[0].rect, Rect::new(20, 2, 6, 6));
        assert_eq!(seg.blobs[1].rect, Rect::new(2, 10, 6, 6));
        assert_eq!(seg.blobs[0].label, 1);
        assert_eq!(seg.blobs[1].label, 2);
        assert_eq!(seg.blobs[0].seed, Point::new(20, 2));
        assert_eq!(seg.blobs[0].pixel_count, 36);
    }

    #[test]
    fn diagonal_touch_merges_with_eight_connectivity() {
        let mut img = RgbImage::new(8, 8);
        img.set_pixel(2, 2, FG);
        img.set_pixel(3, 3, FG);
        img.set_pixel(4, 4, FG);
        let seg = find_blobs(&img.as_view(), &accept_all());
        assert_eq!(seg.blobs.len(), 1);
        assert_eq!(seg.blobs[0].rect, Rect::new(2, 2, 3, 3));
        assert_eq!(seg.blobs[0].pixel_count, 3);
    }

    #[test]
    fn u_shape_labels_resolve_to_one_region() {
        // Two descending arms that only join at the bottom row force a
        // label union between provisional labels.
        let mut img = RgbImage::new(10, 6);
        for y in 0..5 {
            img.set_pixel(2, y, FG);
            img.set_pixel(6, y, FG);
        }
        for x in 2..=6 {
            img.set_pixel(x, 5, FG);
        }
        let seg = find_blobs(&img.as_view(), &accept_all());
        assert_eq!(seg.blobs.len(), 1);
        assert_eq!(seg.blobs[0].rect, Rect::new(2, 0, 5, 6));
    }

    #[test]
    fn size_filter_bounds_are_inclusive() {
        // 5x5, 4x5, and 9x5 regions against a [5,8] x [5,8] filter.
        let img = frame_with_rects(
            40,
            12,
            &[
                Rect::new(1, 1, 5, 5),
                Rect::new(10, 1, 4, 5),
                Rect::new(18, 1, 9, 5),
                Rect::new(30, 1, 8, 8),
            ],
        );
        let filter = BlobSizeFilter {
            min_width: 5,
            min_height: 5,
            max_width: 8,
            max_height: 8,
        };
        let seg = find_blobs(&img.as_view(), &filter);
        let rects: Vec<Rect> = seg.blobs.iter().map(|b| b.rect).collect();
        assert_eq!(rects, vec![Rect::new(1, 1, 5, 5), Rect::new(30, 1, 8, 8)]);
    }
}
