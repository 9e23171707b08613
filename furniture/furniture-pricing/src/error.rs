//! Error types for pricing tables.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur while loading or querying pricing tables.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Pricing file could not be read.
    #[error("failed to read pricing file {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Pricing data could not be parsed.
    #[error("failed to parse pricing data from {origin}: {message}")]
    Parse {
        /// File path or `<string>`.
        origin: String,
        /// Parser diagnostic.
        message: String,
    },

    /// Pricing file extension is neither `toml` nor `json`.
    #[error("unsupported pricing file '{path}' (expected .toml or .json)")]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// A value is out of range.
    #[error("invalid pricing value at {field}: {message}")]
    ValidationFailed {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A table lacks the entry unknown keys fall back to.
    #[error("{table} table has no '{key}' entry to fall back to")]
    MissingFallback {
        /// Table name.
        table: &'static str,
        /// Required fallback key.
        key: &'static str,
    },

    /// Tables could not be serialized.
    #[error("failed to serialize pricing tables: {0}")]
    Serialize(String),
}

impl PricingError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}
