use image::{Rgba, RgbaImage};
use unmarklm::{
    analyze_complexity, detect_region, remove_watermark, ProcessOptions, RemovalMethod,
};

const LIGHT_BG: [u8; 4] = [238, 240, 234, 255];
const DARK_INK: [u8; 4] = [45, 48, 52, 255];

/// 2200x1400 synthetic NotebookLM-style output: solid light background with a
/// dark rendered-text badge near the bottom-right corner.
fn synthetic_watermarked_image() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(2200, 1400, Rgba(LIGHT_BG));
    let region = detect_region(2200, 1400);
    let rx = u32::try_from(region.x).unwrap();
    let ry = u32::try_from(region.y).unwrap();

    // Text-like strokes: short vertical bars with gaps, the way rendered
    // glyphs sample onto a pixel grid
    for y in (ry + 12)..(ry + 32) {
        for x in (rx + 20)..(rx + 280) {
            if (x - rx) % 5 < 3 {
                img.put_pixel(x, y, Rgba(DARK_INK));
            }
        }
    }
    img
}

fn dark_pixel_count(img: &RgbaImage, rx: u32, ry: u32, w: u32, h: u32) -> usize {
    let mut count = 0;
    for y in ry..(ry + h).min(img.height()) {
        for x in rx..(rx + w).min(img.width()) {
            let p = img.get_pixel(x, y);
            let lum = 0.299 * f64::from(p[0]) + 0.587 * f64::from(p[1]) + 0.114 * f64::from(p[2]);
            if lum < 100.0 {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn smartfill_clears_dark_badge_pixels() {
    let img = synthetic_watermarked_image();
    let region = detect_region(2200, 1400);
    let rx = u32::try_from(region.x).unwrap();
    let ry = u32::try_from(region.y).unwrap();
    let rw = u32::try_from(region.width).unwrap();
    let rh = u32::try_from(region.height).unwrap();

    let before = dark_pixel_count(&img, rx, ry, rw, rh);
    assert!(before > 1000, "fixture should contain a badge, got {before}");

    let result = remove_watermark(&img, RemovalMethod::SmartFill, None);
    let after = dark_pixel_count(&result.image, rx, ry, rw, rh);

    assert!(
        after * 100 < before * 45,
        "dark pixels should drop below 45% of {before}, got {after}"
    );
}

#[test]
fn smartfill_region_converges_toward_background() {
    let img = synthetic_watermarked_image();
    let region = detect_region(2200, 1400);
    let rx = u32::try_from(region.x).unwrap();
    let ry = u32::try_from(region.y).unwrap();
    let rw = u32::try_from(region.width).unwrap();
    let rh = u32::try_from(region.height).unwrap();

    let mean_at = |img: &RgbaImage, x0: u32, y0: u32, w: u32, h: u32| -> [f64; 3] {
        let mut sums = [0.0_f64; 3];
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                let p = img.get_pixel(x, y);
                for ch in 0..3 {
                    sums[ch] += f64::from(p[ch]);
                }
            }
        }
        let n = f64::from(w * h);
        [sums[0] / n, sums[1] / n, sums[2] / n]
    };
    let mad = |a: [f64; 3], b: [f64; 3]| -> f64 {
        ((a[0] - b[0]).abs() + (a[1] - b[1]).abs() + (a[2] - b[2]).abs()) / 3.0
    };

    // Background sample just above the region
    let background = mean_at(&img, rx, ry - 12, rw, 8);
    // Center patch of the watermark region
    let (cx, cy) = (rx + rw / 2 - 8, ry + rh / 2 - 8);
    let before = mad(mean_at(&img, cx, cy, 16, 16), background);

    let result = remove_watermark(&img, RemovalMethod::SmartFill, None);
    let after = mad(mean_at(&result.image, cx, cy, 16, 16), background);

    assert!(after < before, "center must move toward background");
    assert!(after < 15.0, "residual difference too large: {after:.2}");
}

#[test]
fn smartfill_never_touches_pixels_outside_region() {
    let img = synthetic_watermarked_image();
    let region = detect_region(2200, 1400);
    let rx = u32::try_from(region.x).unwrap();
    let ry = u32::try_from(region.y).unwrap();

    let result = remove_watermark(&img, RemovalMethod::SmartFill, None);

    // Corner samples far from the watermark
    for (x, y) in [(0, 0), (2199, 0), (0, 1399), (rx - 1, 1399), (2199, ry - 1)] {
        assert_eq!(
            result.image.get_pixel(x, y),
            img.get_pixel(x, y),
            "pixel ({x},{y}) outside the region changed"
        );
    }
}

#[test]
fn crop_removes_the_watermark_strip_entirely() {
    let img = synthetic_watermarked_image();
    let result = remove_watermark(&img, RemovalMethod::Crop, None);

    assert_eq!(result.image.width(), 2200);
    assert_eq!(
        i64::from(result.image.height()),
        i64::from(result.region.y)
    );
    let dark = dark_pixel_count(&result.image, 0, 0, 2200, result.image.height());
    assert_eq!(dark, 0, "no badge pixels may survive a crop");
}

#[test]
fn complexity_score_stays_in_unit_interval() {
    let img = synthetic_watermarked_image();
    let region = detect_region(2200, 1400);
    let score = analyze_complexity(&img, &region);
    assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
    // Solid background above the badge
    assert!(score < 0.05, "flat background should score near 0: {score}");
}

#[test]
fn process_file_round_trips_through_the_filesystem() {
    let dir = std::env::temp_dir().join(format!("unmarklm-test-{}", process_unique()));
    std::fs::create_dir_all(&dir).unwrap();

    let input = dir.join("fixture.png");
    synthetic_watermarked_image().save(&input).unwrap();

    let output = unmarklm::default_output_path(&input);
    assert_eq!(output.file_name().unwrap().to_str().unwrap(), "fixture_clean.png");

    let opts = ProcessOptions::default();
    let result = unmarklm::process_file(&input, &output, &opts);
    assert!(result.success, "processing failed: {}", result.message);

    let cleaned = image::open(&output).unwrap().to_rgba8();
    assert_eq!(cleaned.dimensions(), (2200, 1400));

    std::fs::remove_dir_all(&dir).ok();
}

fn process_unique() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{}-{nanos}", std::process::id())
}
