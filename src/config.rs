//! Configuration structures for the marker_scan pipeline.
//!
//! This module defines all tunable parameters for segmentation and
//! statistics, organized into logical groups. Color range, blur parameters,
//! area bounds, and working size are all named fields here, so the same
//! code can target different marker colors and object sizes.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed
//! programmatically:
//!
//! ```no_run
//! use marker_scan::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::color::hsv::ColorRange;
use crate::color::stats::StatisticsSpace;
use crate::constants;
use crate::error::{Result, ScanError};

/// Complete pipeline configuration.
///
/// Contains all parameters needed to process an image from decode to
/// statistics. Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Working size every photograph is normalized to before segmentation.
    /// `None` processes images at their native resolution.
    #[serde(default = "default_working_size")]
    pub working_size: Option<WorkingSize>,

    /// HSV bounds of the target marker band
    pub color_range: ColorRange,

    /// Mask smoothing parameters
    pub smoothing: SmoothingConfig,

    /// Region selection parameters
    pub selection: SelectionConfig,

    /// Statistics parameters
    pub statistics: StatisticsConfig,
}

/// Dimensions images are resized to before segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSize {
    pub width: u32,
    pub height: u32,
}

/// Gaussian smoothing applied to the mask before re-binarization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Kernel side length in pixels (must be odd)
    pub kernel_size: u32,

    /// Kernel standard deviation
    pub sigma: f32,
}

/// Which contour becomes the target region.
///
/// `First` takes the first qualifying contour in discovery order (a
/// raster-scan traversal, outermost borders first). `LargestArea` is
/// independent of traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    First,
    LargestArea,
}

/// Area heuristic gating which contours may become the target region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Contours must have area strictly above this, in pixel-area units
    pub min_area: f64,

    /// Contours must have area strictly below this, in pixel-area units
    pub max_area: f64,

    /// Which qualifying contour is selected
    pub rule: SelectionRule,
}

impl SelectionConfig {
    /// Test the open-interval area heuristic
    pub fn qualifies(&self, area: f64) -> bool {
        area > self.min_area && area < self.max_area
    }
}

/// Statistics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Color space the crop is measured in. Region selection always runs in
    /// HSV; this chooses whether the crop is converted before measurement
    /// (`Hsv`, so the hue/saturation/value labels are truthful) or measured
    /// raw (`Rgb`).
    pub space: StatisticsSpace,
}

fn default_working_size() -> Option<WorkingSize> {
    Some(WorkingSize {
        width: constants::working_size::WIDTH,
        height: constants::working_size::HEIGHT,
    })
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            kernel_size: constants::smoothing::KERNEL_SIZE,
            sigma: constants::smoothing::SIGMA,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_area: constants::selection::MIN_CONTOUR_AREA,
            max_area: constants::selection::MAX_CONTOUR_AREA,
            rule: SelectionRule::First,
        }
    }
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            space: StatisticsSpace::Hsv,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            working_size: default_working_size(),
            color_range: ColorRange::new(
                constants::hsv_range::LOWER,
                constants::hsv_range::UPPER,
            ),
            smoothing: SmoothingConfig::default(),
            selection: SelectionConfig::default(),
            statistics: StatisticsConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Check every precondition the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = &self.working_size {
            if size.width == 0 || size.height == 0 {
                return Err(ScanError::invalid_parameter(
                    "working_size",
                    format!("{}x{}", size.width, size.height),
                ));
            }
        }

        for channel in 0..3 {
            if self.color_range.lower[channel] > self.color_range.upper[channel] {
                return Err(ScanError::invalid_parameter(
                    "color_range",
                    format!(
                        "lower {} > upper {} in channel {}",
                        self.color_range.lower[channel],
                        self.color_range.upper[channel],
                        channel
                    ),
                ));
            }
        }
        if self.color_range.lower[0] > constants::hsv_range::HUE_MAX {
            return Err(ScanError::invalid_parameter(
                "color_range.lower",
                self.color_range.lower[0],
            ));
        }

        if self.smoothing.kernel_size == 0 || self.smoothing.kernel_size % 2 == 0 {
            return Err(ScanError::invalid_parameter(
                "smoothing.kernel_size",
                self.smoothing.kernel_size,
            ));
        }
        if !self.smoothing.sigma.is_finite() || self.smoothing.sigma <= 0.0 {
            return Err(ScanError::invalid_parameter(
                "smoothing.sigma",
                self.smoothing.sigma,
            ));
        }

        if self.selection.min_area < 0.0 || self.selection.min_area >= self.selection.max_area {
            return Err(ScanError::invalid_parameter(
                "selection",
                format!(
                    "min_area {} max_area {}",
                    self.selection.min_area, self.selection.max_area
                ),
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
