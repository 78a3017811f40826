//! End-to-end pipeline tests over synthetic frames.

use blobshape::{
    BlobSizeFilter, CornerAccumulator, Point, Rect, Rgb, RgbImage, Shape, ShapeDetector,
    ShapeDetectorParams,
};

const TARGET: Rgb = Rgb::new(200, 40, 40);
const BACKDROP: Rgb = Rgb::new(12, 14, 18);

fn fill_rect(img: &mut RgbImage, rect: Rect, color: Rgb) {
    for y in rect.y..rect.y + rect.height as i32 {
        for x in rect.x..rect.x + rect.width as i32 {
            img.set_pixel(x as usize, y as usize, color);
        }
    }
}

fn fill_disk(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: Rgb) {
    for y in cy - r..=cy + r {
        for x in cx - r..=cx + r {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r * r {
                img.set_pixel(x as usize, y as usize, color);
            }
        }
    }
}

/// 120x90 frame with a red rectangle and a red disk on a dark backdrop.
fn scene() -> RgbImage {
    let mut frame = RgbImage::new(120, 90);
    fill_rect(&mut frame, Rect::new(0, 0, 120, 90), BACKDROP);
    fill_rect(&mut frame, Rect::new(10, 10, 30, 20), TARGET);
    fill_disk(&mut frame, 85, 55, 14, TARGET);
    frame
}

fn detector() -> ShapeDetector {
    ShapeDetector::new(ShapeDetectorParams::for_reference_color(TARGET, 60))
}

#[test]
fn classifies_rectangle_and_circle_in_raster_order() {
    let mut frame = scene();
    let detections = detector().detect(&mut frame);
    assert_eq!(detections.len(), 2);

    // The rectangle's top row (y = 10) precedes the disk's top (y = 41).
    match &detections[0].shape {
        Shape::Rectangle { corners } => {
            for expected in [
                Point::new(10, 10),
                Point::new(39, 10),
                Point::new(39, 29),
                Point::new(10, 29),
            ] {
                let hit = corners
                    .iter()
                    .any(|c| (c.x - expected.x).abs() <= 1 && (c.y - expected.y).abs() <= 1);
                assert!(hit, "no corner near {expected:?} in {corners:?}");
            }
        }
        other => panic!("expected Rectangle first, got {other:?}"),
    }

    match &detections[1].shape {
        Shape::Circle { center, radius } => {
            assert!((center.x - 85.0).abs() < 1.5, "center.x = {}", center.x);
            assert!((center.y - 55.0).abs() < 1.5, "center.y = {}", center.y);
            assert!((radius - 14.0).abs() < 1.5, "radius = {radius}");
        }
        other => panic!("expected Circle second, got {other:?}"),
    }
}

#[test]
fn rerunning_on_a_fresh_clone_is_deterministic() {
    let frame = scene();
    let det = detector();
    let first = det.detect(&mut frame.clone());
    let second = det.detect(&mut frame.clone());
    assert_eq!(first, second);
}

#[test]
fn one_degenerate_region_does_not_affect_siblings() {
    let mut frame = scene();
    // A 7x1 sliver: passes a relaxed size filter but has a degenerate
    // boundary the classifier refuses.
    fill_rect(&mut frame, Rect::new(60, 4, 7, 1), TARGET);

    let mut params = ShapeDetectorParams::for_reference_color(TARGET, 60);
    params.blob_size = BlobSizeFilter {
        min_width: 1,
        min_height: 1,
        max_width: u32::MAX,
        max_height: u32::MAX,
    };
    let detections = ShapeDetector::new(params).detect(&mut frame);

    // The sliver is skipped, the rectangle and the disk still come through.
    assert_eq!(detections.len(), 2);
    assert!(matches!(detections[0].shape, Shape::Rectangle { .. }));
    assert!(matches!(detections[1].shape, Shape::Circle { .. }));
}

#[test]
fn size_filter_drops_out_of_range_blobs() {
    let mut frame = scene();
    let mut params = ShapeDetectorParams::for_reference_color(TARGET, 60);
    params.blob_size = BlobSizeFilter {
        min_width: 5,
        min_height: 5,
        max_width: 29,
        max_height: 29,
    };
    // Rectangle is 30 wide, above max; the disk sits exactly on the
    // inclusive 29-pixel limit and survives.
    let detections = ShapeDetector::new(params).detect(&mut frame);
    assert_eq!(detections.len(), 1);
    assert!(matches!(detections[0].shape, Shape::Circle { .. }));
}

#[test]
fn corners_accumulate_across_frames_until_saturation() {
    let det = detector();
    let mut acc = CornerAccumulator::new(6);

    // Same scene twice: the rectangle's four corners are duplicates on the
    // second pass, so the set stays within capacity.
    let (_, saturated) = det.detect_and_accumulate(&mut scene(), &mut acc);
    assert!(!saturated);
    let after_first = acc.len();
    assert_eq!(after_first, 4);
    let (_, saturated) = det.detect_and_accumulate(&mut scene(), &mut acc);
    assert!(!saturated);
    assert_eq!(acc.len(), after_first);

    // A shifted rectangle brings four new corners; capacity 6 refuses some
    // and latches the signal.
    let mut shifted = scene();
    fill_rect(&mut shifted, Rect::new(10, 10, 30, 20), BACKDROP);
    fill_rect(&mut shifted, Rect::new(50, 8, 22, 14), TARGET);
    let (_, saturated) = det.detect_and_accumulate(&mut shifted, &mut acc);
    assert!(saturated);
    assert!(acc.is_saturated());

    acc.reset();
    assert_eq!(acc.len(), 0);
    assert!(!acc.is_saturated());
}
