//! Per-channel statistics over a cropped region
//!
//! Computes a fixed 256-bucket intensity histogram and the arithmetic mean
//! for each of the three channels of a crop. The computation makes no
//! assumption about color space beyond "3 independent channels of bounded
//! integer intensity"; which space the numbers describe is recorded
//! alongside the results so consumers can label them truthfully.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::constants::histogram::BUCKETS;

/// Color space a crop is measured in.
///
/// The region is selected in HSV space but cropped from the original color
/// image, so the measurement space is a deliberate choice: `Hsv` converts
/// the crop before measuring (the channel means really are mean
/// hue/saturation/value), `Rgb` measures the raw crop channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticsSpace {
    /// Measure the crop converted to byte-scaled HSV
    Hsv,
    /// Measure the crop's raw RGB channels
    Rgb,
}

/// Per-channel 256-bucket intensity histogram.
///
/// Invariant: for each channel, the bucket counts sum to the number of
/// pixels in the measured region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistogram {
    counts: [[u32; BUCKETS]; 3],
}

impl ChannelHistogram {
    /// Build the histogram of a region's three channels
    pub fn from_region(region: &RgbImage) -> Self {
        let mut counts = [[0u32; BUCKETS]; 3];
        for pixel in region.pixels() {
            for channel in 0..3 {
                counts[channel][pixel[channel] as usize] += 1;
            }
        }
        Self { counts }
    }

    /// Bucket counts for one channel
    pub fn channel(&self, channel: usize) -> &[u32; BUCKETS] {
        &self.counts[channel]
    }

    /// Count in a single bucket
    pub fn count(&self, channel: usize, bucket: u8) -> u32 {
        self.counts[channel][bucket as usize]
    }

    /// Total mass of one channel (equals the region's pixel count)
    pub fn total(&self, channel: usize) -> u64 {
        self.counts[channel].iter().map(|&c| c as u64).sum()
    }
}

/// Arithmetic channel means over a region, each in [0, 255]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelStatistics {
    /// Color space the means describe
    pub space: StatisticsSpace,
    /// Mean intensity per channel
    pub means: [f32; 3],
    /// Number of pixels measured
    pub pixel_count: u64,
}

/// Compute the per-channel arithmetic means of a region
pub fn channel_means(region: &RgbImage) -> [f32; 3] {
    let pixel_count = (region.width() as u64) * (region.height() as u64);
    if pixel_count == 0 {
        return [0.0; 3];
    }

    let mut sums = [0u64; 3];
    for pixel in region.pixels() {
        for channel in 0..3 {
            sums[channel] += pixel[channel] as u64;
        }
    }
    [
        (sums[0] as f64 / pixel_count as f64) as f32,
        (sums[1] as f64 / pixel_count as f64) as f32,
        (sums[2] as f64 / pixel_count as f64) as f32,
    ]
}

/// Compute histogram and means for a region measured in the given space.
///
/// The caller is responsible for having converted `region` into `space`
/// already; this function only records which space the numbers belong to.
pub fn analyze_region(
    region: &RgbImage,
    space: StatisticsSpace,
) -> (ChannelHistogram, ChannelStatistics) {
    let histogram = ChannelHistogram::from_region(region);
    let statistics = ChannelStatistics {
        space,
        means: channel_means(region),
        pixel_count: (region.width() as u64) * (region.height() as u64),
    };
    (histogram, statistics)
}
