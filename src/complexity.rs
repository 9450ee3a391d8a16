//! Background complexity estimation.
//!
//! Samples a thin band directly above the watermark region and reduces it to
//! a single texture score. The removal algorithm never branches on this —
//! it is a diagnostic signal surfaced to callers (the CLI reports it in
//! verbose mode) so a user can judge how trustworthy a smartfill result is
//! before inspecting it.

use image::RgbaImage;

use crate::region::WatermarkRegion;

/// Height of the sampling band above the region, in rows.
const BAND_ROWS: i64 = 8;
/// Score returned when there is nothing meaningful to sample.
const NEUTRAL_SCORE: f32 = 0.5;
/// Pooled-stddev value that maps to a score of 1.0. A fixed calibration
/// constant, not derived from the image.
const STDDEV_CEILING: f64 = 50.0;

/// Estimate background texture complexity above the watermark region.
///
/// Returns a score in `[0, 1]` where 0 means a solid color and 1 means very
/// busy texture. Computed as the pooled population standard deviation of the
/// R, G and B readings in an 8-row band immediately above the region, mapped
/// through `min(1, stddev / 50)`.
///
/// Returns a neutral 0.5 when the region has no rows above it to sample, or
/// when fewer than two pixels are available.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn analyze_complexity(image: &RgbaImage, region: &WatermarkRegion) -> f32 {
    let img_w = i64::from(image.width());
    let img_h = i64::from(image.height());

    let ry = i64::from(region.y);
    let sample_y = (ry - BAND_ROWS).max(0);
    let sample_h = BAND_ROWS.min(ry).min(img_h - sample_y);
    if sample_h <= 0 {
        return NEUTRAL_SCORE;
    }

    let rx = i64::from(region.x).max(0);
    let rw = i64::from(region.width).min(img_w - rx);
    if rw <= 0 || rw * sample_h < 2 {
        return NEUTRAL_SCORE;
    }

    let mut sums = [0.0_f64; 3];
    for py in 0..sample_h {
        for px in 0..rw {
            let pixel = image.get_pixel((rx + px) as u32, (sample_y + py) as u32);
            for ch in 0..3 {
                sums[ch] += f64::from(pixel[ch]);
            }
        }
    }

    let count = (rw * sample_h) as f64;
    let means = [sums[0] / count, sums[1] / count, sums[2] / count];

    // Population variance pooled across all three channels
    let mut sq_sum = 0.0_f64;
    for py in 0..sample_h {
        for px in 0..rw {
            let pixel = image.get_pixel((rx + px) as u32, (sample_y + py) as u32);
            for ch in 0..3 {
                let dev = f64::from(pixel[ch]) - means[ch];
                sq_sum += dev * dev;
            }
        }
    }
    let variance = sq_sum / (count * 3.0);

    (variance.sqrt() / STDDEV_CEILING).min(1.0) as f32
}
