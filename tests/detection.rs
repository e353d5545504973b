use std::{fs, path::Path};

use image::{DynamicImage, Rgb, RgbImage};
use splice_detect::{
    SpliceAnalyzer,
    detection::{SplicingConfig, splicing::SplicingDetector},
    error::SpliceError,
    report::JsonReport,
    session::{STATUS_COMPLETED, Session},
};
use tempfile::TempDir;

const JPEG_TOLERANCE: u8 = 8;

fn write_png(dir: &Path, name: &str, image: &RgbImage) -> std::path::PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

// Black original, forged with a white square aligned to JPEG blocks.
fn spliced_pair() -> (RgbImage, RgbImage) {
    let original = RgbImage::from_pixel(32, 32, Rgb([0, 0, 0]));
    let mut forged = original.clone();
    for y in 8..24 {
        for x in 8..24 {
            forged.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    (forged, original)
}

fn assert_within_tolerance(decoded: &RgbImage, expected: &RgbImage) {
    assert_eq!(decoded.dimensions(), expected.dimensions());
    for (a, b) in decoded.pixels().zip(expected.pixels()) {
        for c in 0..3 {
            assert!(
                a[c].abs_diff(b[c]) <= JPEG_TOLERANCE,
                "decoded {:?} differs from expected {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_missing_file_is_load_error() {
    let dir = TempDir::new().unwrap();
    let original = write_png(dir.path(), "original.png", &RgbImage::new(4, 4));

    let err = SpliceAnalyzer::new(dir.path().join("nope.png"), &original)
        .err()
        .unwrap();
    assert!(matches!(err, SpliceError::Load { .. }));
}

#[test]
fn test_corrupt_file_is_load_error() {
    let dir = TempDir::new().unwrap();
    let corrupt = dir.path().join("corrupt.jpg");
    fs::write(&corrupt, b"definitely not a jpeg").unwrap();
    let original = write_png(dir.path(), "original.png", &RgbImage::new(4, 4));

    let err = SpliceAnalyzer::new(&corrupt, &original).err().unwrap();
    match err {
        SpliceError::Load { path, .. } => assert_eq!(path, corrupt),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_saved_output_matches_in_memory_result() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("spliced_regions_output.jpg");
    let (forged, original) = spliced_pair();

    let config = SplicingConfig::default().with_output_path(&output);
    let result = SpliceAnalyzer::from_images(
        DynamicImage::ImageRgb8(forged),
        DynamicImage::ImageRgb8(original),
    )
    .with_config(config)
    .detect_and_save()
    .unwrap();

    assert_eq!(result.summary.spliced_pixels, 16 * 16);
    assert_eq!(result.spliced_regions_output.get_pixel(10, 10).0, [0, 0, 0]);
    assert_eq!(result.spliced_regions_output.get_pixel(0, 0).0, [255, 255, 255]);

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_within_tolerance(&decoded, &result.spliced_regions_output);
}

#[test]
fn test_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.jpg");
    fs::write(&output, b"stale").unwrap();

    let black = DynamicImage::ImageRgb8(RgbImage::new(16, 16));
    let detector =
        SplicingDetector::with_config(SplicingConfig::default().with_output_path(&output))
            .unwrap();
    detector.detect_and_save(&black, &black).unwrap();

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_within_tolerance(&decoded, &RgbImage::from_pixel(16, 16, Rgb([255, 255, 255])));
}

#[test]
fn test_mismatch_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.jpg");

    let detector =
        SplicingDetector::with_config(SplicingConfig::default().with_output_path(&output))
            .unwrap();
    let err = detector
        .detect_and_save(
            &DynamicImage::ImageRgb8(RgbImage::new(8, 8)),
            &DynamicImage::ImageRgb8(RgbImage::new(8, 9)),
        )
        .unwrap_err();

    assert!(matches!(err, SpliceError::DimensionMismatch { .. }));
    assert!(!output.exists());
}

#[test]
fn test_session_end_to_end() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("spliced_regions_output.jpg");
    let (forged, original) = spliced_pair();
    let forged_path = write_png(dir.path(), "forged.png", &forged);
    let original_path = write_png(dir.path(), "original.png", &original);

    let mut session = Session::new(SplicingConfig::default().with_output_path(&output));
    session.select_forged(&forged_path).unwrap();
    assert!(!output.exists());
    session.select_original(&original_path).unwrap();

    assert_eq!(session.status(), STATUS_COMPLETED);
    assert!(output.exists());

    let frame = session.render();
    let panes = frame.panes();
    assert_eq!(panes.len(), 4);
    assert!(panes.iter().all(|p| p.dimensions() == (300, 300)));

    let panel = session.render_panel().unwrap();
    assert_eq!(panel.dimensions(), (4 * 300 + 5 * 8, 300 + 2 * 8));

    let report = JsonReport::from(session.result().unwrap())
        .with_inputs(&forged_path, &original_path)
        .with_output(&output);
    let report_path = dir.path().join("report.json");
    report.save_json(&report_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(value["splicing"]["spliced_pixels"], 256);
}

#[test]
fn test_session_surfaces_mismatch() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.jpg");
    let forged_path = write_png(dir.path(), "forged.png", &RgbImage::new(4, 4));
    let original_path = write_png(dir.path(), "original.png", &RgbImage::new(5, 4));

    let mut session = Session::new(SplicingConfig::default().with_output_path(&output));
    session.select_forged(&forged_path).unwrap();
    let err = session.select_original(&original_path).unwrap_err();

    assert!(matches!(err, SpliceError::DimensionMismatch { .. }));
    assert!(session.status().contains("same dimensions"));
    assert!(session.result().is_none());
    assert!(session.render().panes().is_empty());
    assert!(!output.exists());
}
