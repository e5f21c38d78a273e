//! Binary mask construction from an HSV color range
//!
//! Converts each pixel of an RGB photograph into byte-scaled HSV and marks
//! the pixels whose converted values fall inside the configured range.
//! Pure function of its inputs; decode failures are the loader's concern
//! and never reach this component.

use image::{GrayImage, Luma, RgbImage};

use crate::color::hsv::{rgb_to_hsv, ColorRange};

/// Mask value for pixels inside the color range
pub const FOREGROUND: u8 = 255;

/// Builds binary masks of pixels matching a fixed HSV range
#[derive(Debug, Clone)]
pub struct ColorMaskBuilder {
    range: ColorRange,
}

impl ColorMaskBuilder {
    /// Create a mask builder for the given color range
    pub fn new(range: ColorRange) -> Self {
        Self { range }
    }

    /// The range this builder matches against
    pub fn range(&self) -> &ColorRange {
        &self.range
    }

    /// Produce a mask of identical dimensions where each cell is 255 if the
    /// corresponding source pixel falls inside the range, else 0.
    pub fn build(&self, image: &RgbImage) -> GrayImage {
        let mut mask = GrayImage::new(image.width(), image.height());
        for (x, y, pixel) in image.enumerate_pixels() {
            let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
            if self.range.contains(h, s, v) {
                mask.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    // Dark red, h=178 — inside the default band.
    const MARKER: Rgb<u8> = Rgb([200, 20, 30]);
    // Pure green, h=60 — outside.
    const BACKGROUND: Rgb<u8> = Rgb([0, 255, 0]);

    fn default_builder() -> ColorMaskBuilder {
        ColorMaskBuilder::new(ColorRange::new([150, 40, 40], [189, 255, 255]))
    }

    #[test]
    fn test_mask_dimensions_match_source() {
        let image = RgbImage::from_pixel(17, 9, BACKGROUND);
        let mask = default_builder().build(&image);
        assert_eq!((mask.width(), mask.height()), (17, 9));
    }

    #[test]
    fn test_all_background_yields_zero_mask() {
        let image = RgbImage::from_pixel(8, 8, BACKGROUND);
        let mask = default_builder().build(&image);
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_matching_pixels_are_foreground() {
        let mut image = RgbImage::from_pixel(4, 4, BACKGROUND);
        image.put_pixel(1, 2, MARKER);
        image.put_pixel(3, 0, MARKER);

        let mask = default_builder().build(&image);

        assert_eq!(mask.get_pixel(1, 2)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(3, 0)[0], FOREGROUND);
        let foreground = mask.pixels().filter(|p| p[0] == FOREGROUND).count();
        assert_eq!(foreground, 2);
    }

    #[test]
    fn test_wrap_around_hue_matches() {
        // Bright red has hue 0, reachable only through the wrapped band.
        let image = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        let mask = default_builder().build(&image);
        assert!(mask.pixels().all(|p| p[0] == FOREGROUND));
    }
}
