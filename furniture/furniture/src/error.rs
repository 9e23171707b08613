//! Error types for the end-to-end pipeline.

use std::path::PathBuf;

use furniture_budget::BudgetError;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type FurnitureResult<T> = Result<T, FurnitureError>;

/// Errors surfaced by the pipeline outside of [`AnalysisResult`](furniture_parts::AnalysisResult).
#[derive(Debug, Error)]
pub enum FurnitureError {
    /// Budget could not be composed.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    /// Report could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
