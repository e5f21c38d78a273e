//! Target region extraction from a binary mask
//!
//! Implements the region half of the pipeline:
//! - Smooths the mask with a Gaussian kernel to soften quantization noise
//! - Re-binarizes with an automatically selected Otsu threshold
//! - Traces contours of the connected foreground components
//! - Selects the target contour by an area heuristic
//! - Crops the original color image to the contour's bounding box
//!
//! Smoothing is lossy by design: it trades boundary precision for stability
//! against thresholding noise, so recovered bounds can shift by a few pixels
//! relative to the ideal mask.

use image::{imageops, GrayImage, RgbImage};
use imageproc::contours::find_contours;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::separable_filter_equal;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::config::{SelectionConfig, SelectionRule, SmoothingConfig};
use crate::error::{Result, ScanError};

/// Minimal axis-aligned box enclosing a selected contour.
///
/// Invariant: produced boxes always have `width > 0` and `height > 0`;
/// the absence of a region is reported as [`ScanError::NoRegionFound`],
/// never as a degenerate box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Successful extraction: the box and the crop of the original color image
#[derive(Debug, Clone)]
pub struct RegionCrop {
    /// Where the target region sits in the source image
    pub bounding_box: BoundingBox,
    /// Sub-image of the original (not the mask), in the source's RGB space
    pub crop: RgbImage,
}

/// Extracts the target region from a color-range mask
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    smoothing: SmoothingConfig,
    selection: SelectionConfig,
}

impl RegionExtractor {
    /// Create an extractor with the given smoothing and selection parameters
    pub fn new(smoothing: SmoothingConfig, selection: SelectionConfig) -> Self {
        Self {
            smoothing,
            selection,
        }
    }

    /// Locate the target region in `mask` and crop `image` to it.
    ///
    /// # Arguments
    ///
    /// * `image` - The original color image the mask was built from
    /// * `mask` - Binary mask of candidate foreground pixels
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NoRegionFound`] when no contour satisfies the
    /// area heuristic, and [`ScanError::ProcessingError`] when mask and
    /// image dimensions disagree.
    pub fn extract(&self, image: &RgbImage, mask: &GrayImage) -> Result<RegionCrop> {
        if mask.dimensions() != image.dimensions() {
            return Err(ScanError::processing(format!(
                "mask dimensions {:?} do not match image dimensions {:?}",
                mask.dimensions(),
                image.dimensions()
            )));
        }

        let smoothed = self.smooth(mask);
        let binary = binarize(&smoothed);

        let traces: Vec<Vec<Point<i32>>> = find_contours::<i32>(&binary)
            .into_iter()
            .map(|contour| contour.points)
            .collect();

        let selected = select_contour(&traces, &self.selection).ok_or_else(|| {
            ScanError::no_region(format!(
                "no contour with {} < area < {} among {} candidate(s)",
                self.selection.min_area,
                self.selection.max_area,
                traces.len()
            ))
        })?;

        let bounding_box = trace_bounding_box(&traces[selected]);
        let crop = imageops::crop_imm(
            image,
            bounding_box.x,
            bounding_box.y,
            bounding_box.width,
            bounding_box.height,
        )
        .to_image();

        Ok(RegionCrop { bounding_box, crop })
    }

    fn smooth(&self, mask: &GrayImage) -> GrayImage {
        let kernel = gaussian_kernel(self.smoothing.kernel_size, self.smoothing.sigma);
        separable_filter_equal(mask, &kernel)
    }
}

/// Re-binarize a smoothed mask with Otsu's inter-class variance threshold.
///
/// A single automatically chosen cut point adapts to variable lighting
/// without per-image tuning.
fn binarize(smoothed: &GrayImage) -> GrayImage {
    let level = otsu_level(smoothed);
    threshold(smoothed, level, ThresholdType::Binary)
}

/// Pick the target contour according to the configured selection rule
fn select_contour(traces: &[Vec<Point<i32>>], selection: &SelectionConfig) -> Option<usize> {
    match selection.rule {
        SelectionRule::First => traces
            .iter()
            .position(|trace| selection.qualifies(contour_area(trace))),
        SelectionRule::LargestArea => {
            let mut best: Option<(usize, f64)> = None;
            for (index, trace) in traces.iter().enumerate() {
                let area = contour_area(trace);
                if !selection.qualifies(area) {
                    continue;
                }
                // Strict comparison keeps the earliest trace on ties.
                if best.map_or(true, |(_, best_area)| area > best_area) {
                    best = Some((index, area));
                }
            }
            best.map(|(index, _)| index)
        }
    }
}

/// Enclosed area of a traced boundary polygon, by the shoelace formula.
///
/// This is the polygon area of the border trace, not the pixel count of
/// the region it encloses.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0i64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        doubled += (p.x as i64) * (q.y as i64) - (q.x as i64) * (p.y as i64);
    }
    doubled.unsigned_abs() as f64 / 2.0
}

fn trace_bounding_box(points: &[Point<i32>]) -> BoundingBox {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    BoundingBox {
        x: min_x as u32,
        y: min_y as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

/// Normalized one-dimensional Gaussian kernel of the given support
fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let center = (size - 1) as f32 / 2.0;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-d * d / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn default_extractor() -> RegionExtractor {
        RegionExtractor::new(SmoothingConfig::default(), SelectionConfig::default())
    }

    fn filled_rect_mask(
        width: u32,
        height: u32,
        x0: u32,
        y0: u32,
        rect_w: u32,
        rect_h: u32,
    ) -> GrayImage {
        let mut mask = GrayImage::new(width, height);
        for y in y0..y0 + rect_h {
            for x in x0..x0 + rect_w {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        mask
    }

    fn rect_trace(x0: i32, y0: i32, w: i32, h: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + w, y0),
            Point::new(x0 + w, y0 + h),
            Point::new(x0, y0 + h),
        ]
    }

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        let kernel = gaussian_kernel(7, 3.0);
        assert_eq!(kernel.len(), 7);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..3 {
            assert!((kernel[i] - kernel[6 - i]).abs() < 1e-6);
        }
        assert!(kernel[3] > kernel[2]);
    }

    #[test]
    fn test_contour_area_polygon() {
        // Unit square traced as a 4-point polygon.
        assert_eq!(contour_area(&rect_trace(0, 0, 1, 1)), 1.0);
        assert_eq!(contour_area(&rect_trace(5, 7, 10, 4)), 40.0);
        // Degenerate traces enclose nothing.
        assert_eq!(contour_area(&[Point::new(3, 3)]), 0.0);
        assert_eq!(contour_area(&[Point::new(0, 0), Point::new(9, 0)]), 0.0);
    }

    #[test]
    fn test_area_interval_is_open() {
        let selection = SelectionConfig::default();
        assert!(!selection.qualifies(10.0));
        assert!(selection.qualifies(10.5));
        assert!(selection.qualifies(11.0));
        assert!(selection.qualifies(999_999.0));
        assert!(!selection.qualifies(1_000_000.0));
    }

    #[test]
    fn test_select_first_takes_traversal_order() {
        let traces = vec![
            rect_trace(0, 0, 2, 2),    // area 4, below minimum
            rect_trace(10, 10, 5, 5),  // area 25, first qualifying
            rect_trace(30, 30, 40, 40), // area 1600, larger but later
        ];
        let selection = SelectionConfig::default();
        assert_eq!(select_contour(&traces, &selection), Some(1));
    }

    #[test]
    fn test_select_largest_area_rule() {
        let traces = vec![
            rect_trace(10, 10, 5, 5),
            rect_trace(30, 30, 40, 40),
            rect_trace(80, 80, 6, 6),
        ];
        let selection = SelectionConfig {
            rule: SelectionRule::LargestArea,
            ..SelectionConfig::default()
        };
        assert_eq!(select_contour(&traces, &selection), Some(1));
    }

    #[test]
    fn test_select_none_when_nothing_qualifies() {
        let traces = vec![rect_trace(0, 0, 2, 2)];
        assert_eq!(select_contour(&traces, &SelectionConfig::default()), None);
    }

    #[test]
    fn test_extract_recovers_rectangle_bounds() {
        let image = RgbImage::from_pixel(200, 160, image::Rgb([0, 200, 0]));
        let mask = filled_rect_mask(200, 160, 60, 40, 80, 60);

        let region = default_extractor().extract(&image, &mask).unwrap();
        let bb = region.bounding_box;

        // Smoothing may shift the recovered boundary by a few pixels.
        let tolerance = 5i64;
        assert!((bb.x as i64 - 60).abs() <= tolerance);
        assert!((bb.y as i64 - 40).abs() <= tolerance);
        assert!((bb.width as i64 - 80).abs() <= tolerance);
        assert!((bb.height as i64 - 60).abs() <= tolerance);
        assert_eq!(region.crop.dimensions(), (bb.width, bb.height));
    }

    #[test]
    fn test_extract_empty_mask_reports_no_region() {
        let image = RgbImage::from_pixel(64, 64, image::Rgb([0, 200, 0]));
        let mask = GrayImage::new(64, 64);

        let err = default_extractor().extract(&image, &mask).unwrap_err();
        assert!(matches!(err, ScanError::NoRegionFound { .. }));
    }

    #[test]
    fn test_extract_rejects_mismatched_dimensions() {
        let image = RgbImage::new(10, 10);
        let mask = GrayImage::new(12, 10);

        let err = default_extractor().extract(&image, &mask).unwrap_err();
        assert!(matches!(err, ScanError::ProcessingError { .. }));
    }

    #[test]
    fn test_crop_comes_from_color_image() {
        let mut image = RgbImage::from_pixel(100, 100, image::Rgb([0, 200, 0]));
        for y in 30..70 {
            for x in 30..70 {
                image.put_pixel(x, y, image::Rgb([200, 20, 30]));
            }
        }
        let mask = filled_rect_mask(100, 100, 30, 30, 40, 40);

        let region = default_extractor().extract(&image, &mask).unwrap();
        let center = region
            .crop
            .get_pixel(region.crop.width() / 2, region.crop.height() / 2);
        assert_eq!(center.0, [200, 20, 30]);
    }
}
