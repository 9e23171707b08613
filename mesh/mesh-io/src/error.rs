//! Error types for upload validation and mesh loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while validating or loading an uploaded model.
///
/// [`IoError::UnsupportedFormat`] and [`IoError::FileTooLarge`] are
/// validation failures the user can fix by uploading a different file.
/// Everything else means the bytes could not be turned into geometry.
#[derive(Debug, Error)]
pub enum IoError {
    /// Extension is not one of the accepted model formats.
    #[error("unsupported format .{extension}; accepted: {accepted}")]
    UnsupportedFormat {
        /// The rejected extension, lower-cased (`(none)` when missing).
        extension: String,
        /// Comma-separated list of accepted extensions.
        accepted: String,
    },

    /// Upload exceeds the size limit.
    #[error("file too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        /// Size of the upload in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// The file parsed but contains no vertices.
    #[error("model contains no geometry")]
    EmptyGeometry,

    /// Invalid header in binary STL.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual header size.
        got: usize,
    },

    /// Binary STL ended before the declared face count.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Expected number of faces.
        expected: u32,
        /// Actual number of faces read.
        got: u32,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// `true` for failures detected before any parsing (format or size).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. } | Self::FileTooLarge { .. })
    }
}
