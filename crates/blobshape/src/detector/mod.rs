//! Frame pipeline: color filter, blob extraction, boundary tracing, and
//! shape classification wired into one synchronous pass, plus the
//! cross-frame helpers for calibration and corner accumulation.

mod params;
mod pipeline;
mod result;

pub use params::ShapeDetectorParams;
pub use pipeline::ShapeDetector;
pub use result::DetectedShape;
