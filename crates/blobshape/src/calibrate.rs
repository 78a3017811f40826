//! Reference-color calibration by median sampling.
//!
//! The filter's reference color drifts with lighting, so hosts periodically
//! sample a patch of the frame known to show the target and feed the result
//! back into [`crate::filter::ColorFilterParams::center`]. The per-channel
//! median is used instead of the mean to stay robust against specular
//! highlights and stray background pixels inside the patch.

use blobshape_core::{Rect, Rgb, RgbImageView};

/// Calibration contract violations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("sample rectangle {rect:?} does not lie inside the {width}x{height} frame")]
    InvalidRegion {
        rect: Rect,
        width: usize,
        height: usize,
    },
}

/// Per-channel median color of `rect` within the frame.
///
/// For even sample counts the upper median is taken. The rectangle must lie
/// fully inside the frame and be non-empty; anything else is a caller
/// contract violation reported as [`CalibrationError::InvalidRegion`].
pub fn sample_median(view: &RgbImageView<'_>, rect: Rect) -> Result<Rgb, CalibrationError> {
    if !view.contains_rect(&rect) {
        return Err(CalibrationError::InvalidRegion {
            rect,
            width: view.width,
            height: view.height,
        });
    }

    let n = rect.width as usize * rect.height as usize;
    let mut r = Vec::with_capacity(n);
    let mut g = Vec::with_capacity(n);
    let mut b = Vec::with_capacity(n);
    for y in rect.y..rect.y + rect.height as i32 {
        for x in rect.x..rect.x + rect.width as i32 {
            let px = view.pixel(x as usize, y as usize);
            r.push(px.r);
            g.push(px.g);
            b.push(px.b);
        }
    }

    Ok(Rgb::new(median(&mut r), median(&mut g), median(&mut b)))
}

fn median(channel: &mut [u8]) -> u8 {
    let mid = channel.len() / 2;
    *channel.select_nth_unstable(mid).1
}

/// Centered sample rectangle covering `frac` of each frame dimension,
/// clamped to at least one pixel. Mirrors the original calibration gesture
/// of sampling the middle of the frame.
pub fn center_patch(width: usize, height: usize, frac: f32) -> Rect {
    let frac = frac.clamp(0.0, 1.0);
    let pw = ((width as f32 * frac) as u32).max(1);
    let ph = ((height as f32 * frac) as u32).max(1);
    Rect::new(
        (width as i32 - pw as i32) / 2,
        (height as i32 - ph as i32) / 2,
        pw,
        ph,
    )
}
