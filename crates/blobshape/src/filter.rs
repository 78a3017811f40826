//! Euclidean color distance filter.
//!
//! Keeps pixels whose RGB distance to a reference color is within a radius
//! and blacks out everything else, in place. This is the first pipeline
//! stage; the blob extractor treats the blacked-out pixels as background.

use serde::{Deserialize, Serialize};

use blobshape_core::{Rgb, RgbImage};

/// Acceptance sphere in 3-channel color space.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ColorFilterParams {
    /// Reference color at the sphere center, usually produced by
    /// [`crate::calibrate::sample_median`].
    pub center: Rgb,
    /// Maximum Euclidean channel-space distance from the reference color.
    /// `0` keeps only exact matches.
    pub radius: u16,
}

impl Default for ColorFilterParams {
    fn default() -> Self {
        // Tuned for a saturated red target under indoor lighting; real
        // deployments recalibrate via the median sampler.
        Self {
            center: Rgb::new(215, 30, 30),
            radius: 100,
        }
    }
}

/// Black out every pixel farther than `params.radius` from the reference
/// color. Pixels within the radius pass through unchanged. A zero-size
/// frame is a no-op.
pub fn apply_in_place(frame: &mut RgbImage, params: &ColorFilterParams) {
    let radius_sq = u32::from(params.radius) * u32::from(params.radius);
    let center = params.center;

    for px in frame.data.chunks_exact_mut(3) {
        let c = Rgb::new(px[0], px[1], px[2]);
        if c.distance_sq(&center) > radius_sq {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_keeps_only_exact_matches() {
        let center = Rgb::new(120, 40, 200);
        let mut frame = RgbImage::new(4, 1);
        frame.set_pixel(0, 0, center);
        frame.set_pixel(1, 0, Rgb::new(121, 40, 200)); // off by one channel step
        frame.set_pixel(2, 0, Rgb::new(120, 40, 199));
        frame.set_pixel(3, 0, center);

        apply_in_place(&mut frame, &ColorFilterParams { center, radius: 0 });

        assert_eq!(frame.pixel(0, 0), center);
        assert_eq!(frame.pixel(1, 0), Rgb::BLACK);
        assert_eq!(frame.pixel(2, 0), Rgb::BLACK);
        assert_eq!(frame.pixel(3, 0), center);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let center = Rgb::new(100, 100, 100);
        let mut frame = RgbImage::new(2, 1);
        // distance exactly 5 (3-4-0 triangle), then just past it
        frame.set_pixel(0, 0, Rgb::new(103, 104, 100));
        frame.set_pixel(1, 0, Rgb::new(103, 105, 100));

        apply_in_place(&mut frame, &ColorFilterParams { center, radius: 5 });

        assert_eq!(frame.pixel(0, 0), Rgb::new(103, 104, 100));
        assert_eq!(frame.pixel(1, 0), Rgb::BLACK);
    }

    #[test]
    fn empty_frame_is_a_noop() {
        let mut frame = RgbImage::new(0, 0);
        apply_in_place(&mut frame, &ColorFilterParams::default());
        assert!(frame.data.is_empty());
    }
}
