use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// An RGB color, one byte per channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance to `other` in 3-channel space.
    ///
    /// Kept squared so distance comparisons avoid the square root; the
    /// maximum value (3 * 255^2) fits comfortably in `u32`.
    #[inline]
    pub fn distance_sq(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Borrowed, read-only view of an interleaved RGB8 frame.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    /// Row-major, 3 bytes per pixel, len = w*h*3.
    pub data: &'a [u8],
}

impl<'a> RgbImageView<'a> {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.width + x) * 3;
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// True when `rect` lies fully inside the frame.
    #[inline]
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.x >= 0
            && rect.y >= 0
            && rect.width > 0
            && rect.height > 0
            && (rect.x as usize + rect.width as usize) <= self.width
            && (rect.y as usize + rect.height as usize) <= self.height
    }
}

/// Owned interleaved RGB8 frame, mutable in place by filters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Allocate an all-black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Wrap an existing interleaved buffer. `data.len()` must equal
    /// `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 3 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.width + x) * 3;
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, c: Rgb) {
        let i = (y * self.width + x) * 3;
        self.data[i] = c.r;
        self.data[i + 1] = c.g;
        self.data[i + 2] = c.b;
    }

    #[inline]
    pub fn as_view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}
