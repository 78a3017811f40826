use serde::{Deserialize, Serialize};

use blobshape_core::Rgb;

use crate::blobs::BlobSizeFilter;
use crate::filter::ColorFilterParams;
use crate::shape::ShapeClassifierParams;

/// Configuration for one [`super::ShapeDetector`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ShapeDetectorParams {
    /// Color acceptance sphere for the first stage.
    #[serde(default)]
    pub filter: ColorFilterParams,
    /// Bounding-box limits for emitted blobs, bounds inclusive.
    #[serde(default)]
    pub blob_size: BlobSizeFilter,
    /// Tolerances for the classification cascade.
    #[serde(default)]
    pub classifier: ShapeClassifierParams,
}

impl Default for ShapeDetectorParams {
    fn default() -> Self {
        Self {
            filter: ColorFilterParams::default(),
            blob_size: BlobSizeFilter::default(),
            classifier: ShapeClassifierParams::default(),
        }
    }
}

impl ShapeDetectorParams {
    /// Defaults around a known reference color, the common case after a
    /// calibration pass.
    pub fn for_reference_color(center: Rgb, radius: u16) -> Self {
        Self {
            filter: ColorFilterParams { center, radius },
            ..Self::default()
        }
    }
}
