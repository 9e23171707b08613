//! Reference pricing for furniture cost estimation.
//!
//! [`PricingTables`] bundles every figure the cost composer needs: sheet
//! material prices with waste fractions, accessory unit prices per quality
//! tier, labor base rate with complexity multipliers, and cutting unit costs.
//! A compiled-in snapshot is available via [`PricingTables::builtin`];
//! alternative snapshots load from TOML or JSON with [`load_pricing`].
//!
//! # Fallbacks
//!
//! Unknown keys never fail a lookup while the fallback entries exist:
//!
//! | Table | Fallback |
//! |-------|----------|
//! | materials | `mdf_15mm` |
//! | accessories | `common` |
//! | labor multipliers | `medium` |
//!
//! Loading rejects tables that lack them.
//!
//! # Hot swapping
//!
//! [`PricingStore`] holds the current snapshot behind an `Arc`. A price
//! update installs a new snapshot with [`PricingStore::replace`]; budgets
//! already running keep the snapshot they started with.
//!
//! # Example
//!
//! ```toml
//! [source]
//! supplier = "Workshop"
//! url = "https://example.com"
//! captured_on = "2026-01-15"
//!
//! [materials.mdf_15mm]
//! price_per_m2 = 80.0
//! waste_fraction = 0.2
//! description = "MDF 15mm"
//! supplier = "Generic"
//!
//! [accessories.common]
//! hinge = 10.0
//! handle = 12.0
//! slide = 40.0
//! shelf_support = 5.0
//! lock = 20.0
//! fastener_kit = 3.0
//!
//! [labor]
//! base_rate_per_m2 = 100.0
//! multipliers = { medium = 1.5 }
//!
//! [cutting]
//! straight_cut_per_m = 3.0
//! curved_cut_per_m = 5.0
//! hinge_bore = 2.0
//! rebate_per_m = 4.0
//! chamfer_per_m = 2.5
//! minimum_per_piece = 10.0
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod load;
mod store;
mod tables;

pub use error::{PricingError, PricingResult};
pub use load::load_pricing;
pub use store::PricingStore;
pub use tables::{
    AccessoryKind, AccessoryPrices, CuttingParameters, DEFAULT_ACCESSORY_TIER,
    DEFAULT_LABOR_COMPLEXITY, DEFAULT_MATERIAL, LaborRates, MaterialSpec, PriceSource,
    PricingTables, Resolved,
};
