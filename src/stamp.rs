//! Clone-stamp (gradient interpolation) watermark removal.
//!
//! For each pixel in the watermark region the expected background color is
//! interpolated between per-column reference bands sampled directly above and
//! below the region. This handles badges sitting on a transition between two
//! background sections (e.g. content above, a footer strip below), where a
//! single-reference fill would paint a visible box.
//!
//! Only pixels that differ significantly from the expected background are
//! replaced — clean background pixels pass through untouched, keeping visual
//! disruption confined to the badge itself.
//!
//! The thresholds, divisors and bias exponents below were calibrated against
//! a reference image set. They have no principled derivation; changing any of
//! them shifts the visual-difference tolerances the results are validated
//! against.

use image::RgbaImage;

use crate::region::WatermarkRegion;

/// Height of each reference band, in rows.
const BAND_ROWS: i64 = 8;
/// Above/below contrast (summed RGB) marking a strong vertical gradient.
const STRONG_GRADIENT_DELTA: f32 = 45.0;
/// Pixel-vs-background mismatch threshold on strong gradients.
const THRESHOLD_GRADIENT: f32 = 16.0;
/// Pixel-vs-background mismatch threshold on flat backgrounds.
const THRESHOLD_FLAT: f32 = 12.0;
/// Replacement-strength divisor on strong gradients.
const ALPHA_DIVISOR_GRADIENT: f32 = 26.0;
/// Replacement-strength divisor on flat backgrounds.
const ALPHA_DIVISOR_FLAT: f32 = 30.0;
/// Rows at the region's bottom edge that get a tapered replacement strength.
const EDGE_FADE_ROWS: i64 = 8;

/// Per-column mean colors of the two reference bands.
struct ReferenceBands {
    above: Vec<[f32; 3]>,
    below: Vec<[f32; 3]>,
}

/// Remove the watermark by blending mismatched pixels toward the expected
/// background, in place.
///
/// The region is clamped to the surface first; a clamped region with zero
/// width or height makes this a no-op. Pixels strictly outside the clamped
/// region are never modified.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn clone_stamp(image: &mut RgbaImage, region: &WatermarkRegion) {
    let img_w = i64::from(image.width());
    let img_h = i64::from(image.height());

    let rx = i64::from(region.x).max(0);
    let ry = i64::from(region.y).max(0);
    let rw = i64::from(region.width).min(img_w - rx);
    let rh = i64::from(region.height).min(img_h - ry);
    if rw <= 0 || rh <= 0 {
        return;
    }

    // Reference bands are captured before any pixel is written, so the below
    // band (which overlaps the region's last rows) always reflects the input.
    let refs = reference_bands(image, rx, ry, rw, rh);

    for py in 0..rh {
        // Interpolation weight: 0 at the top, 1 at the bottom, eased toward
        // the below reference so the lower gradient dominates sooner.
        let t_raw = if rh > 1 {
            py as f32 / (rh - 1) as f32
        } else {
            0.5
        };
        let t = t_raw.powf(0.75);

        for px in 0..rw {
            let above = refs.above[px as usize];
            let below = refs.below[px as usize];

            let interp = [
                above[0] * (1.0 - t) + below[0] * t,
                above[1] * (1.0 - t) + below[1] * t,
                above[2] * (1.0 - t) + below[2] * t,
            ];

            let pixel = image.get_pixel_mut((rx + px) as u32, (ry + py) as u32);
            let current = [
                f32::from(pixel[0]),
                f32::from(pixel[1]),
                f32::from(pixel[2]),
            ];

            let diff = (current[0] - interp[0]).abs()
                + (current[1] - interp[1]).abs()
                + (current[2] - interp[2]).abs();

            // Vertical background contrast for this column
            let bg_delta = (above[0] - below[0]).abs()
                + (above[1] - below[1]).abs()
                + (above[2] - below[2]).abs();
            let strong_gradient = bg_delta > STRONG_GRADIENT_DELTA;

            // The badge has both dark text and a faint light pill background.
            // A tight threshold catches the haze on flat backgrounds; a looser
            // one avoids painting a soft box on strong gradients.
            let threshold = if strong_gradient {
                THRESHOLD_GRADIENT
            } else {
                THRESHOLD_FLAT
            };
            if diff <= threshold {
                // Clean background pixel, leave it alone
                continue;
            }

            let divisor = if strong_gradient {
                ALPHA_DIVISOR_GRADIENT
            } else {
                ALPHA_DIVISOR_FLAT
            };
            let alpha = ((diff - threshold) / divisor).min(1.0);

            // On strong gradients, pull lower rows further toward the below
            // reference so the upper tint is not dragged into footer areas.
            let lower_bias = if strong_gradient {
                t_raw.powf(1.6) * 0.35
            } else {
                0.0
            };

            // Taper replacement near the bottom edge on strong gradients to
            // avoid a visible rectangular boundary.
            let edge_fade = if strong_gradient && py >= rh - EDGE_FADE_ROWS {
                (((rh - 1 - py) as f32) / EDGE_FADE_ROWS as f32).max(0.3)
            } else {
                1.0
            };
            let final_alpha = alpha * edge_fade;

            for ch in 0..3 {
                let target = interp[ch] * (1.0 - lower_bias) + below[ch] * lower_bias;
                let blended = current[ch] * (1.0 - final_alpha) + target * final_alpha;
                pixel[ch] = blended.round().clamp(0.0, 255.0) as u8;
            }
            pixel[3] = 255;
        }
    }
}

/// Sample the 8-row bands above and below the clamped region and reduce each
/// to one mean RGB triple per column.
///
/// The below band ends at the region's bottom edge: the rows beneath the
/// badge pill are typically clean background even though the region covers
/// the full bottom edge for safety.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn reference_bands(image: &RgbaImage, rx: i64, ry: i64, rw: i64, rh: i64) -> ReferenceBands {
    let img_h = i64::from(image.height());

    let above_y = (ry - BAND_ROWS).max(0);
    let mut above_h = ry - above_y;
    if above_h == 0 {
        // Region starts at the top row: fall back to sampling inside it
        above_h = BAND_ROWS;
    }
    let above_h = above_h.min(BAND_ROWS).min(img_h - above_y).max(1);

    let below_y = (img_h - BAND_ROWS).min(ry + rh - BAND_ROWS).max(0);
    let below_h = BAND_ROWS.min(img_h - below_y).max(1);

    let mut above = Vec::with_capacity(rw as usize);
    let mut below = Vec::with_capacity(rw as usize);

    for px in 0..rw {
        above.push(column_mean(image, rx + px, above_y, above_h));
        below.push(column_mean(image, rx + px, below_y, below_h));
    }

    ReferenceBands { above, below }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn column_mean(image: &RgbaImage, x: i64, y0: i64, rows: i64) -> [f32; 3] {
    let mut sums = [0.0_f32; 3];
    for dy in 0..rows {
        let pixel = image.get_pixel(x as u32, (y0 + dy) as u32);
        for ch in 0..3 {
            sums[ch] += f32::from(pixel[ch]);
        }
    }
    let n = rows as f32;
    [sums[0] / n, sums[1] / n, sums[2] / n]
}
