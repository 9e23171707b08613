//! Fabrication cost composition for furniture components.
//!
//! A budget has four categories, each computed per component and summed:
//!
//! - **Material**: area × (1 + waste) × price per m²
//! - **Accessories**: hinges and a handle per door or drawer, a slide pair
//!   per drawer, four supports per shelf
//! - **Labor**: area × base rate × complexity multiplier
//! - **Cutting**: perimeter × straight-cut cost (at least the per-piece
//!   minimum), plus hinge bores for doors and drawers and a rebate for
//!   shelves
//!
//! The margin applies uniformly to the pre-margin subtotal. Every figure is
//! computed unrounded and rounded to cents only in the [`BudgetResult`].
//!
//! # Example
//!
//! ```
//! use furniture_budget::{BudgetConfiguration, compose_budget};
//! use furniture_parts::{Component, ComponentType, Extents};
//! use furniture_pricing::PricingStore;
//!
//! let store = PricingStore::default();
//! let parts = vec![
//!     Component::new(1, "door", ComponentType::Door, Extents::new(0.45, 1.8, 0.02), 0.9),
//!     Component::new(2, "shelf", ComponentType::Shelf, Extents::new(0.8, 0.02, 0.3), 0.9),
//! ];
//! let config = BudgetConfiguration::default().with_accessory_quality("premium");
//!
//! let budget = compose_budget(&parts, &config, &store.snapshot()).unwrap();
//! assert_eq!(budget.components.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod compose;
mod config;
mod cost;
mod error;
mod result;

pub use compose::{compose_budget, compose_for_analysis};
pub use config::{BudgetConfiguration, DEFAULT_MARGIN};
pub use cost::{CostBreakdown, RateCard, accessory_needs, cost_of};
pub use error::{BudgetError, ComposeResult};
pub use result::{
    AccessoryItem, AccessoryLines, BudgetResult, BudgetSummary, ComponentCost, CuttingLine,
    LaborLine, MaterialLine, rate_per_m2, round_money,
};
