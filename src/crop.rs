//! Crop-based watermark removal.
//!
//! The most reliable method: the bottom strip containing the badge is
//! physically removed. Width is preserved; everything from the region's top
//! edge downward is discarded.

use image::RgbaImage;

use crate::region::WatermarkRegion;

/// Produce a new surface truncated at the region's top edge.
///
/// The output has the same width as the input and height `max(1, region.y)`,
/// clamped to the source height. Always succeeds; a region whose top edge is
/// at or above the image top yields a 1-row surface.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn crop_watermark(image: &RgbaImage, region: &WatermarkRegion) -> RgbaImage {
    let keep = i64::from(region.y)
        .max(1)
        .min(i64::from(image.height())) as u32;
    image::imageops::crop_imm(image, 0, 0, image.width(), keep).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::detect_region;
    use image::Rgba;

    #[test]
    fn crop_keeps_width_and_truncates_at_region_top() {
        let img = RgbaImage::from_pixel(1536, 2752, Rgba([200, 200, 200, 255]));
        let region = detect_region(1536, 2752);

        let cropped = crop_watermark(&img, &region);
        assert_eq!(cropped.width(), 1536);
        assert_eq!(i64::from(cropped.height()), i64::from(region.y));
    }

    #[test]
    fn crop_preserves_retained_pixel_content() {
        let mut img = RgbaImage::from_pixel(100, 200, Rgba([10, 20, 30, 255]));
        img.put_pixel(50, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(99, 100, Rgba([0, 255, 0, 255]));
        let region = WatermarkRegion {
            x: 84,
            y: 156,
            width: 16,
            height: 44,
        };

        let cropped = crop_watermark(&img, &region);
        assert_eq!(cropped.height(), 156);
        assert_eq!(*cropped.get_pixel(50, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*cropped.get_pixel(99, 100), Rgba([0, 255, 0, 255]));
        assert_eq!(*cropped.get_pixel(0, 155), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn region_top_at_or_above_image_top_yields_one_row() {
        let img = RgbaImage::from_pixel(60, 30, Rgba([1, 2, 3, 255]));

        let at_top = WatermarkRegion {
            x: 0,
            y: 0,
            width: 60,
            height: 44,
        };
        assert_eq!(crop_watermark(&img, &at_top).height(), 1);

        let above_top = WatermarkRegion {
            x: 0,
            y: -14,
            width: 60,
            height: 44,
        };
        let cropped = crop_watermark(&img, &above_top);
        assert_eq!(cropped.height(), 1);
        assert_eq!(cropped.width(), 60);
    }

    #[test]
    fn removed_fraction_stays_in_calibrated_band_for_tall_images() {
        // Representative NotebookLM output sizes (tall infographics and PDFs)
        for (w, h) in [(1536_u32, 2752_u32), (1080, 2400), (2000, 4000), (1200, 3000)] {
            let region = detect_region(w, h);
            let removed_pct = f64::from(region.height) / f64::from(h) * 100.0;
            assert!(
                removed_pct > 0.5 && removed_pct < 3.2,
                "{w}x{h}: removed {removed_pct:.2}% falls outside the badge-height band"
            );
        }
    }
}
