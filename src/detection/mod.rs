//! Mask construction and target region extraction

pub mod mask;
pub mod region;

pub use mask::ColorMaskBuilder;
pub use region::{BoundingBox, RegionCrop, RegionExtractor};
