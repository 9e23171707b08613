//! Error types for component extraction.

use thiserror::Error;

/// Result type alias for extraction operations.
pub type PartsResult<T> = Result<T, PartsError>;

/// Errors that can occur while turning a model into components.
#[derive(Debug, Error)]
pub enum PartsError {
    /// The model has no geometry with a bounding box.
    #[error("model contains no measurable geometry")]
    EmptyModel,

    /// Every geometry was dropped by the plausibility filter.
    #[error("no furniture components identified ({dropped} geometries outside plausible dimensions)")]
    NoComponents {
        /// Number of geometries that were measured and then dropped.
        dropped: usize,
    },
}

impl PartsError {
    /// Create a no-components error.
    #[must_use]
    pub const fn no_components(dropped: usize) -> Self {
        Self::NoComponents { dropped }
    }
}
