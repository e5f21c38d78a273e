//! # Marker Scan
//!
//! A Rust crate for locating a color-marked object in photographs.
//!
//! This library finds a single colored object of interest against a
//! differently colored background by:
//! - Thresholding in hue/saturation/value space against a configured range
//! - Smoothing and re-binarizing the resulting mask
//! - Tracing connected regions and selecting the target by an area heuristic
//! - Cropping the photograph to the target's bounding box
//! - Computing per-channel histograms and mean statistics over the crop
//!
//! The derived values (bounding box, crop, histogram, statistics) are the
//! library's output contract; rendering them into figures is left to the
//! consuming application.
//!
//! ## Example
//!
//! ```rust,no_run
//! use marker_scan::analyze_marker;
//! use std::path::Path;
//!
//! let report = analyze_marker(Path::new("photo.jpg"))?;
//! println!("found at {:?}, means {:?}", report.bounding_box, report.statistics.means);
//! # Ok::<(), marker_scan::ScanError>(())
//! ```

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod color;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod image_loader;

pub use color::hsv::ColorRange;
pub use color::stats::{ChannelHistogram, ChannelStatistics, StatisticsSpace};
pub use config::{PipelineConfig, SelectionRule};
pub use detection::mask::ColorMaskBuilder;
pub use detection::region::{BoundingBox, RegionExtractor};
pub use error::{Result, ScanError};

/// Complete per-image analysis result.
///
/// `crop` is always the sub-image of the original color photograph (RGB),
/// suitable for thumbnails; `histogram` and `statistics` are measured in
/// the configured [`StatisticsSpace`], recorded on `statistics.space`.
#[derive(Debug, Clone)]
pub struct MarkerReport {
    /// Source identifier (typically the input path)
    pub label: String,
    /// Where the target region sits in the analyzed image
    pub bounding_box: BoundingBox,
    /// Crop of the original color image at the bounding box
    pub crop: RgbImage,
    /// Per-channel 256-bucket histogram over the measured crop
    pub histogram: ChannelHistogram,
    /// Per-channel means over the measured crop
    pub statistics: ChannelStatistics,
}

impl MarkerReport {
    /// Serializable view of the report, without the pixel data
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            label: self.label.clone(),
            bounding_box: self.bounding_box,
            statistics: self.statistics.clone(),
        }
    }
}

/// JSON-friendly report summary for renderers and tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub label: String,
    pub bounding_box: BoundingBox,
    pub statistics: ChannelStatistics,
}

/// Analyze a photograph with the default configuration.
///
/// This is the main entry point. It loads the image, locates the
/// marker-colored region, and computes color statistics over the crop.
///
/// # Errors
///
/// Returns [`ScanError::ImageLoadError`] if the file cannot be read or
/// decoded, and [`ScanError::NoRegionFound`] if no contour satisfies the
/// area heuristic. Both are terminal for this image only; batch callers
/// log and continue with the next path.
pub fn analyze_marker(image_path: &Path) -> Result<MarkerReport> {
    analyze_marker_with_config(image_path, &PipelineConfig::default())
}

/// Analyze a photograph with an explicit configuration
pub fn analyze_marker_with_config(
    image_path: &Path,
    config: &PipelineConfig,
) -> Result<MarkerReport> {
    config.validate()?;
    let image = image_loader::load_image(image_path, config.working_size)?;
    run_pipeline(image, image_path.display().to_string(), config)
}

/// Analyze an already decoded image.
///
/// Applies the same working-size normalization as the file entry points,
/// so in-memory callers see identical behavior.
pub fn analyze_image(
    image: RgbImage,
    label: impl Into<String>,
    config: &PipelineConfig,
) -> Result<MarkerReport> {
    config.validate()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ScanError::processing("image has no pixels"));
    }
    let image = image_loader::normalize(image, config.working_size);
    run_pipeline(image, label.into(), config)
}

fn run_pipeline(image: RgbImage, label: String, config: &PipelineConfig) -> Result<MarkerReport> {
    let mask = ColorMaskBuilder::new(config.color_range.clone()).build(&image);

    let extractor = RegionExtractor::new(config.smoothing, config.selection);
    let region = extractor.extract(&image, &mask)?;

    // The crop is taken from the original color image; measuring it in HSV
    // is a deliberate conversion, not a reinterpretation of the mask.
    let measured = match config.statistics.space {
        StatisticsSpace::Hsv => color::hsv::to_hsv_image(&region.crop),
        StatisticsSpace::Rgb => region.crop.clone(),
    };
    let (histogram, statistics) = color::stats::analyze_region(&measured, config.statistics.space);

    Ok(MarkerReport {
        label,
        bounding_box: region.bounding_box,
        crop: region.crop,
        histogram,
        statistics,
    })
}
