use log::debug;

use blobshape_core::{Rgb, RgbImage, RgbImageView};

use super::{DetectedShape, ShapeDetectorParams};
use crate::blobs::find_blobs;
use crate::calibrate::{center_patch, sample_median, CalibrationError};
use crate::corners::CornerAccumulator;
use crate::edge::trace_boundary;
use crate::filter::apply_in_place;
use crate::shape::classify;

/// Synchronous per-frame detector: color filter, connected components,
/// boundary tracing, shape classification.
///
/// One instance is meant to be driven by a single frame loop; frames
/// arriving while a pass runs should be dropped by the host, not queued.
pub struct ShapeDetector {
    params: ShapeDetectorParams,
}

impl ShapeDetector {
    pub fn new(params: ShapeDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ShapeDetectorParams {
        &self.params
    }

    /// Run one full pipeline pass over `frame`.
    ///
    /// The frame is filtered in place; callers that need the original
    /// pixels afterwards clone it first. Regions the classifier cannot tag
    /// are skipped; one bad region never aborts the pass. Results come in
    /// the extractor's deterministic raster order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect(&self, frame: &mut RgbImage) -> Vec<DetectedShape> {
        apply_in_place(frame, &self.params.filter);

        let seg = find_blobs(&frame.as_view(), &self.params.blob_size);

        let mut detections = Vec::with_capacity(seg.blobs.len());
        for blob in &seg.blobs {
            let boundary = trace_boundary(&seg, blob);
            if boundary.is_empty() {
                debug!("blob {} has a degenerate boundary, skipped", blob.label);
                continue;
            }
            match classify(&boundary, &self.params.classifier) {
                Some(shape) => detections.push(DetectedShape {
                    label: blob.label,
                    bounds: blob.rect,
                    pixel_count: blob.pixel_count,
                    shape,
                }),
                None => debug!("blob {} unclassifiable, skipped", blob.label),
            }
        }

        debug!(
            "frame pass: {} blobs, {} classified",
            seg.blobs.len(),
            detections.len()
        );
        detections
    }

    /// [`detect`](Self::detect), then offer every polygonal result's
    /// corners to `accumulator`. Returns the detections and whether the
    /// accumulator is saturated after the pass (the cross-frame "enough
    /// corners seen" signal).
    pub fn detect_and_accumulate(
        &self,
        frame: &mut RgbImage,
        accumulator: &mut CornerAccumulator,
    ) -> (Vec<DetectedShape>, bool) {
        let detections = self.detect(frame);
        for det in &detections {
            let Some(corners) = det.corner_points() else {
                continue;
            };
            for &corner in corners {
                accumulator.offer(corner);
            }
        }
        (detections, accumulator.is_saturated())
    }

    /// Re-calibrate the reference color from a centered patch covering
    /// `patch_frac` of each frame dimension, as the original's adaptive
    /// calibration does. Updates the filter params and returns the sampled
    /// color.
    pub fn calibrate_from_center(
        &mut self,
        frame: &RgbImageView<'_>,
        patch_frac: f32,
    ) -> Result<Rgb, CalibrationError> {
        let patch = center_patch(frame.width, frame.height, patch_frac);
        let color = sample_median(frame, patch)?;
        debug!("calibrated reference color {color:?} from {patch:?}");
        self.params.filter.center = color;
        Ok(color)
    }
}
