//! Error types for chart configuration, composition and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all chart operations
#[derive(Debug)]
pub enum ChartError {
    /// Failed to decode a thumbnail image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// None of the configured thumbnail paths produced an image
    EmptyImagePool {
        /// Number of paths that were tried
        attempted: usize,
    },

    /// Letter pool cannot fill the rings without repeating a letter
    InsufficientPool {
        /// Distinct letters available
        available: usize,
        /// Distinct letters needed
        required: usize,
    },

    /// Chart parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to encode the canvas as a raster image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Failed to build or serialize the PDF document
    DocumentExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// At least one enabled output format could not be written
    ExportIncomplete {
        /// Number of formats that failed
        failed: usize,
        /// Number of formats attempted
        attempted: usize,
    },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::EmptyImagePool { attempted } => {
                write!(
                    f,
                    "No valid image files found among {attempted} configured path(s)"
                )
            }
            Self::InsufficientPool {
                available,
                required,
            } => {
                write!(
                    f,
                    "Letter pool has {available} distinct letter(s) but {required} are required"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::DocumentExport { path, reason } => {
                write!(
                    f,
                    "Failed to export document to '{}': {reason}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ExportIncomplete { failed, attempted } => {
                write!(f, "{failed} of {attempted} output format(s) failed to export")
            }
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for chart results
pub type Result<T> = std::result::Result<T, ChartError>;

impl From<image::ImageError> for ChartError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ChartError {
    ChartError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl ChartError {
    /// Whether the error stems from configuration rather than I/O
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyImagePool { .. }
                | Self::InsufficientPool { .. }
                | Self::InvalidParameter { .. }
        )
    }
}
