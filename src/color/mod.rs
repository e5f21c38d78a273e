//! Color space conversion and region statistics
//!
//! This module handles the byte-scaled HSV representation used for
//! thresholding and the per-channel statistics computed over crops.

pub mod hsv;
pub mod stats;

pub use hsv::ColorRange;
pub use stats::{ChannelHistogram, ChannelStatistics, StatisticsSpace};
