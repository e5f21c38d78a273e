//! Byte-scaled HSV conversion and color range matching
//!
//! The segmentation pipeline thresholds in hue/saturation/value space
//! because color-range bounds are more stable under lighting change than
//! raw RGB. This module converts pixels into the byte-scaled convention
//! used by the configured ranges: hue in [0, 179] (degrees halved, wrapping
//! at 180), saturation and value in [0, 255].

use image::RgbImage;
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::constants::hsv_range::HUE_MAX;

/// Inclusive per-channel HSV bounds for mask building.
///
/// The hue channel is circular. An `upper` hue above [`HUE_MAX`] denotes a
/// band crossing the wrap point: `lower=[150, ..], upper=[189, ..]` matches
/// hues in [150, 179] and [0, 9].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    /// Inclusive lower bound per channel (hue, saturation, value)
    pub lower: [u8; 3],

    /// Inclusive upper bound per channel (hue, saturation, value)
    pub upper: [u8; 3],
}

impl ColorRange {
    /// Create a range from inclusive lower/upper HSV triples
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Test whether a byte-scaled HSV triple falls inside the range
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        self.hue_in_band(h)
            && s >= self.lower[1]
            && s <= self.upper[1]
            && v >= self.lower[2]
            && v <= self.upper[2]
    }

    fn hue_in_band(&self, h: u8) -> bool {
        if self.upper[0] > HUE_MAX {
            // Band crosses the wrap point at 180.
            let wrapped_upper = self.upper[0] - (HUE_MAX + 1);
            h >= self.lower[0] || h <= wrapped_upper
        } else {
            h >= self.lower[0] && h <= self.upper[0]
        }
    }
}

/// Convert an RGB triple to byte-scaled HSV components.
///
/// Hue is halved from degrees into [0, 179]; a rounded value of 180 wraps
/// back to 0, keeping the circular channel in range.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let srgb = Srgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    );
    let hsv = Hsv::from_color(srgb);

    let mut h = (hsv.hue.into_positive_degrees() / 2.0).round() as u16;
    if h > HUE_MAX as u16 {
        h = 0;
    }
    let s = (hsv.saturation * 255.0).round() as u8;
    let v = (hsv.value * 255.0).round() as u8;

    (h as u8, s, v)
}

/// Convert a whole RGB image into its byte-scaled HSV representation.
///
/// The result reuses the RGB pixel container with channels reinterpreted as
/// (hue, saturation, value); callers that need truthful hue/saturation/value
/// statistics over a crop convert deliberately through this function rather
/// than measuring raw RGB channels.
pub fn to_hsv_image(image: &RgbImage) -> RgbImage {
    let mut hsv = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        hsv.put_pixel(x, y, image::Rgb([h, s, v]));
    }
    hsv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
    }

    #[test]
    fn test_rgb_to_hsv_achromatic() {
        // Saturation collapses to zero on grays; value tracks intensity.
        let (_, s, v) = rgb_to_hsv(255, 255, 255);
        assert_eq!((s, v), (0, 255));

        let (_, s, v) = rgb_to_hsv(0, 0, 0);
        assert_eq!((s, v), (0, 0));

        let (_, s, v) = rgb_to_hsv(128, 128, 128);
        assert_eq!(s, 0);
        assert_eq!(v, 128);
    }

    #[test]
    fn test_hue_stays_in_byte_range() {
        // (255, 0, 1) sits just below 360 degrees; the rounded half-angle
        // must wrap to 0 rather than escape to 180.
        let (h, _, _) = rgb_to_hsv(255, 0, 1);
        assert!(h <= HUE_MAX);
    }

    #[test]
    fn test_wrapping_range() {
        let range = ColorRange::new([150, 40, 40], [189, 255, 255]);

        assert!(range.contains(150, 128, 128));
        assert!(range.contains(179, 128, 128));
        assert!(range.contains(0, 128, 128));
        assert!(range.contains(9, 128, 128));
        assert!(!range.contains(10, 128, 128));
        assert!(!range.contains(149, 128, 128));
        assert!(!range.contains(60, 128, 128));
    }

    #[test]
    fn test_non_wrapping_range() {
        let range = ColorRange::new([30, 0, 0], [90, 255, 255]);

        assert!(range.contains(30, 0, 0));
        assert!(range.contains(90, 255, 255));
        assert!(!range.contains(29, 128, 128));
        assert!(!range.contains(91, 128, 128));
        assert!(!range.contains(0, 128, 128));
    }

    #[test]
    fn test_saturation_and_value_bounds() {
        let range = ColorRange::new([150, 40, 40], [189, 255, 255]);

        assert!(!range.contains(160, 39, 128));
        assert!(!range.contains(160, 128, 39));
        assert!(range.contains(160, 40, 40));
    }

    #[test]
    fn test_to_hsv_image_matches_per_pixel_conversion() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgb([200, 20, 30]));
        image.put_pixel(1, 0, image::Rgb([0, 255, 0]));

        let hsv = to_hsv_image(&image);
        for (x, y, pixel) in image.enumerate_pixels() {
            let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
            assert_eq!(hsv.get_pixel(x, y).0, [h, s, v]);
        }
    }
}
