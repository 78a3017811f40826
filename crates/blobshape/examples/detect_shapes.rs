//! Detect color blobs in an image file and print a JSON report.
//!
//! Usage: `detect_shapes <image> [params.json]`
//!
//! Without a params file the detector first calibrates its reference color
//! from the center fifth of the image, mimicking the live calibration
//! gesture of pointing the camera at the target.

use std::{env, fs};

use blobshape::{DetectedShape, Rgb, RgbImage, ShapeDetector, ShapeDetectorParams};
use image::ImageReader;
use log::{info, LevelFilter};
use serde::Serialize;

use blobshape_core::init_with_level;

#[derive(Debug, Serialize)]
struct Report {
    image_path: String,
    reference_color: Rgb,
    detections: Vec<DetectedShape>,
    saturated: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Info)?;

    let mut args = env::args().skip(1);
    let image_path = args.next().ok_or("usage: detect_shapes <image> [params.json]")?;
    let params_path = args.next();

    let decoded = ImageReader::open(&image_path)?.decode()?.to_rgb8();
    let (w, h) = (decoded.width() as usize, decoded.height() as usize);
    let mut frame = RgbImage::from_raw(w, h, decoded.into_raw()).ok_or("bad image buffer")?;
    info!("loaded {image_path} ({w}x{h})");

    let detector = match params_path {
        Some(path) => {
            let params: ShapeDetectorParams = serde_json::from_str(&fs::read_to_string(path)?)?;
            ShapeDetector::new(params)
        }
        None => {
            let mut det = ShapeDetector::new(ShapeDetectorParams::default());
            let color = det.calibrate_from_center(&frame.as_view(), 0.2)?;
            info!("calibrated reference color {color:?}");
            det
        }
    };

    let mut accumulator = blobshape::CornerAccumulator::default();
    let (detections, saturated) =
        detector.detect_and_accumulate(&mut frame, &mut accumulator);
    info!(
        "{} regions classified, {} corners accumulated",
        detections.len(),
        accumulator.len()
    );

    let report = Report {
        image_path,
        reference_color: detector.params().filter.center,
        detections,
        saturated,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
