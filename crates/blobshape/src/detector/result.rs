use serde::{Deserialize, Serialize};

use blobshape_core::{Point, Rect};

use crate::shape::Shape;

/// One classified region of a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedShape {
    /// Region label in the frame's segmentation.
    pub label: u32,
    /// Region bounding box.
    pub bounds: Rect,
    /// Number of region pixels.
    pub pixel_count: u32,
    pub shape: Shape,
}

impl DetectedShape {
    /// Corner points for polygonal results; `None` for circles.
    pub fn corner_points(&self) -> Option<&[Point]> {
        self.shape.corner_points()
    }
}
