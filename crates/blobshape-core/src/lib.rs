//! Core raster and geometry types for color-blob shape detection.
//!
//! This crate is intentionally small. It holds the pixel buffer types, the
//! color value type, and the integer geometry the detectors operate on. It
//! does *not* depend on any concrete filter or classifier.

mod geometry;
mod image;
mod logger;

pub use geometry::{Point, Rect};
pub use image::{Rgb, RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
