//! Watermark region detection.
//!
//! The NotebookLM badge is a small semi-transparent pill at the bottom-right
//! corner with a near-fixed pixel footprint (~200x20 px) regardless of image
//! size. Detection is therefore purely geometric: 16% of the width covers the
//! badge with padding at any resolution, while the height uses a 44 px floor
//! because the badge does not scale with image height.

/// Fraction of the image width covered by the watermark region.
const WIDTH_FRACTION: f64 = 0.16;
/// Fraction of the image height covered by the watermark region.
const HEIGHT_FRACTION: f64 = 0.009;
/// Minimum region height in pixels. Calibrated from pixel-level measurements
/// across real NotebookLM outputs; also covers text ascenders that extend
/// above the pill area.
const MIN_HEIGHT_PX: i32 = 44;

/// A rectangular watermark region in pixel coordinates.
///
/// Regions produced by [`detect_region`] are anchored to the bottom-right
/// corner: `x + width` equals the image width and `y + height` equals the
/// image height. On images shorter than the 44 px minimum badge height `y`
/// goes negative; consumers clamp to the surface before sampling
/// (the clone-stamp engine clamps internally, the crop engine treats
/// `y <= 0` as a 1-row output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkRegion {
    /// Left edge, in pixels from the image's left border.
    pub x: i32,
    /// Top edge, in pixels from the image's top border. May be negative.
    pub y: i32,
    /// Region width in pixels, always >= 1.
    pub width: i32,
    /// Region height in pixels, always >= 1.
    pub height: i32,
}

/// Detect the watermark region for an image of the given dimensions.
///
/// Pure and total for any `width, height >= 1`. The returned region always
/// reaches the bottom-right corner exactly.
///
/// ```
/// use unmarklm::detect_region;
///
/// let region = detect_region(1536, 2752);
/// assert_eq!(region.x + region.width, 1536);
/// assert_eq!(region.y + region.height, 2752);
/// assert_eq!(region.height, 44);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn detect_region(width: u32, height: u32) -> WatermarkRegion {
    let region_w = ((f64::from(width) * WIDTH_FRACTION).round() as i32).max(1);
    let region_h = ((f64::from(height) * HEIGHT_FRACTION).round() as i32).max(MIN_HEIGHT_PX);

    WatermarkRegion {
        x: width as i32 - region_w,
        y: height as i32 - region_h,
        width: region_w,
        height: region_h,
    }
}
