//! Image loading and working-size normalization
//!
//! Single entry point for bringing a photograph into the pipeline: format
//! detection by extension, decode through the `image` crate, conversion to
//! RGB, and the optional resize to the configured working size. Decode
//! failures are reported as [`ScanError::ImageLoadError`] before the core
//! pipeline ever runs.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbImage};
use std::path::Path;

use crate::config::WorkingSize;
use crate::error::{Result, ScanError};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// TGA image
    Tga,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "tga" => Some(ImageFormat::Tga),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            _ => None,
        }
    }
}

/// Load an image from disk as RGB, optionally normalized to a working size.
///
/// The original photographs this pipeline targets vary in resolution; the
/// working-size resize puts every image on the same pixel grid so the area
/// heuristic means the same thing across a batch.
///
/// # Errors
///
/// Returns [`ScanError::ImageLoadError`] if the file cannot be opened,
/// the format is not supported, or decoding fails.
pub fn load_image(path: &Path, working_size: Option<WorkingSize>) -> Result<RgbImage> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(ScanError::image_load_message(format!(
            "Unknown image format for file: {}",
            path.display()
        )));
    }

    let reader = ImageReader::open(path).map_err(|e| {
        ScanError::image_load(
            format!("Failed to open image file: {}", path.display()),
            e,
        )
    })?;

    let decoded: DynamicImage = reader.decode().map_err(|e| {
        ScanError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    let rgb = decoded.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(ScanError::image_load_message(format!(
            "Image has no pixels: {}",
            path.display()
        )));
    }

    Ok(normalize(rgb, working_size))
}

/// Resize an already decoded image to the working size, if one is set
pub fn normalize(image: RgbImage, working_size: Option<WorkingSize>) -> RgbImage {
    match working_size {
        Some(size) if image.dimensions() != (size.width, size.height) => {
            imageops::resize(&image, size.width, size.height, FilterType::Triangle)
        }
        _ => image,
    }
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "tga", "pbm", "pgm", "ppm",
        "pnm", "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
