//! Error types for budget composition.

use furniture_pricing::PricingError;
use thiserror::Error;

/// Result type alias for budget composition.
pub type ComposeResult<T> = Result<T, BudgetError>;

/// Errors that can occur while composing a budget.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Margin is outside `[0, 1)`.
    #[error("margin must be in [0, 1), got {margin}")]
    InvalidMargin {
        /// Rejected margin.
        margin: f64,
    },

    /// No components to price.
    #[error("cannot compose a budget without components")]
    NoComponents,

    /// The analysis the budget was requested for did not succeed.
    #[error("cannot compose a budget for a failed analysis: {message}")]
    AnalysisFailed {
        /// The analysis failure message.
        message: String,
    },

    /// Pricing tables lack a required entry.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl BudgetError {
    /// Whether the request itself was invalid, as opposed to the price data.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::Pricing(_))
    }
}
