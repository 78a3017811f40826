//! Color-calibrated blob extraction and geometric shape classification.
//!
//! The crate implements one synchronous frame pipeline:
//!
//! 1. [`filter::apply_in_place`] keeps pixels near a reference color and
//!    blacks out the rest.
//! 2. [`blobs::find_blobs`] labels the surviving connected regions and
//!    filters them by bounding-box size.
//! 3. [`edge::trace_boundary`] walks each region's outer contour.
//! 4. [`shape::classify`] tags every boundary as a circle, rectangle,
//!    quadrilateral, convex polygon, or bounding-quad approximation.
//!
//! [`detector::ShapeDetector`] wires the stages together and adds the two
//! cross-frame helpers: median-color calibration from a center patch and
//! corner accumulation with a saturation signal.
//!
//! The pipeline never does I/O and never retains a reference to a frame past
//! the call; hosts own frame acquisition, display, and persistence.

pub mod blobs;
pub mod calibrate;
pub mod corners;
pub mod detector;
pub mod edge;
pub mod filter;
pub mod shape;

pub use blobs::{find_blobs, Blob, BlobSizeFilter, Segmentation};
pub use calibrate::{center_patch, sample_median, CalibrationError};
pub use corners::{CornerAccumulator, OfferOutcome};
pub use detector::{DetectedShape, ShapeDetector, ShapeDetectorParams};
pub use edge::trace_boundary;
pub use filter::{apply_in_place, ColorFilterParams};
pub use shape::{classify, Shape, ShapeClassifierParams};

pub use blobshape_core::{Point, Rect, Rgb, RgbImage, RgbImageView};
