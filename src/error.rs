//! Error types for the marker_scan library

use thiserror::Error;

/// Result type alias for marker_scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Error types for the segmentation and statistics pipeline
#[derive(Error, Debug)]
pub enum ScanError {
    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No contour satisfied the area selection heuristic
    #[error("No target region found: {reason}")]
    NoRegionFound { reason: String },

    /// Invalid configuration parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Generic processing error
    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

impl ScanError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image load error without an underlying cause
    pub fn image_load_message(message: impl Into<String>) -> Self {
        Self::ImageLoadError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a no-region-found error
    pub fn no_region(reason: impl Into<String>) -> Self {
        Self::NoRegionFound {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a processing error
    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    /// Check if this error indicates a recoverable condition.
    ///
    /// Recoverable errors are terminal for the current image but must not
    /// abort a batch; the caller continues with the next path.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScanError::ImageLoadError { .. } | ScanError::NoRegionFound { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ScanError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            ScanError::NoRegionFound { .. } => {
                "Could not find a marker-colored region. Please check that the object is visible and the color range matches.".to_string()
            }
            ScanError::InvalidParameter { parameter, .. } => {
                format!("Configuration value for '{}' is out of range.", parameter)
            }
            _ => "Image analysis failed. Please try with a different image.".to_string(),
        }
    }
}
