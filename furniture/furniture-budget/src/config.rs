//! Per-request budget configuration.

use furniture_pricing::{DEFAULT_ACCESSORY_TIER, DEFAULT_LABOR_COMPLEXITY, DEFAULT_MATERIAL};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, ComposeResult};

/// Default profit margin.
pub const DEFAULT_MARGIN: f64 = 0.30;

/// Choices that parameterize one budget.
///
/// Unknown material, tier or complexity keys are not errors; the pricing
/// tables fall back to their defaults. Only the margin is validated.
///
/// # Example
///
/// ```
/// use furniture_budget::BudgetConfiguration;
///
/// let config = BudgetConfiguration::default();
/// assert_eq!(config.material, "mdf_15mm");
/// assert!((config.margin - 0.30).abs() < 1e-10);
///
/// let premium = BudgetConfiguration::default()
///     .with_accessory_quality("premium")
///     .with_margin(0.45);
/// assert!(premium.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfiguration {
    /// Material id, e.g. `mdf_18mm`.
    pub material: String,
    /// Accessory tier, e.g. `premium`.
    pub accessory_quality: String,
    /// Labor complexity, e.g. `complex`.
    pub labor_complexity: String,
    /// Profit margin fraction in `[0, 1)`.
    pub margin: f64,
}

impl Default for BudgetConfiguration {
    fn default() -> Self {
        Self {
            material: DEFAULT_MATERIAL.to_string(),
            accessory_quality: DEFAULT_ACCESSORY_TIER.to_string(),
            labor_complexity: DEFAULT_LABOR_COMPLEXITY.to_string(),
            margin: DEFAULT_MARGIN,
        }
    }
}

impl BudgetConfiguration {
    /// Set the material id.
    #[must_use]
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Set the accessory tier.
    #[must_use]
    pub fn with_accessory_quality(mut self, tier: impl Into<String>) -> Self {
        self.accessory_quality = tier.into();
        self
    }

    /// Set the labor complexity.
    #[must_use]
    pub fn with_labor_complexity(mut self, complexity: impl Into<String>) -> Self {
        self.labor_complexity = complexity.into();
        self
    }

    /// Set the margin fraction.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Check the margin is in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetError::InvalidMargin`] otherwise, including for NaN.
    pub fn validate(&self) -> ComposeResult<()> {
        if (0.0..1.0).contains(&self.margin) {
            Ok(())
        } else {
            Err(BudgetError::InvalidMargin {
                margin: self.margin,
            })
        }
    }
}
