//! Furniture fabrication cost estimation from 3D models.
//!
//! This umbrella crate re-exports the furniture crates and adds the
//! end-to-end pipeline: an uploaded file goes through validation, loading,
//! part identification and classification, and then cost composition
//! against the current pricing snapshot.
//!
//! ```text
//! bytes ─▶ mesh-io ─▶ furniture-parts ─▶ furniture-budget ─▶ BudgetResult
//!                                             ▲
//!                                   furniture-pricing
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use furniture::prelude::*;
//!
//! let estimator = Estimator::new();
//! let bytes = std::fs::read("wardrobe.obj").unwrap();
//!
//! let analysis = estimator.analyze_upload(&bytes, "wardrobe.obj");
//! if !analysis.success {
//!     eprintln!("{}", analysis.error_message().unwrap_or_default());
//!     return;
//! }
//!
//! let config = BudgetConfiguration::default().with_material("mdf_18mm");
//! let budget = estimator.quote(&analysis, &config).unwrap();
//! println!("{}", format_currency(budget.summary.final_total));
//! ```
//!
//! # Failures
//!
//! Analysis never returns `Err`: a rejected upload, an unparsable file or a
//! model with no plausible parts all produce an [`AnalysisResult`] with
//! `success == false` and a [`FailureKind`]. Quoting a failed analysis is
//! refused with [`BudgetError::AnalysisFailed`](budget::BudgetError::AnalysisFailed).
//!
//! # Module Organization
//!
//! - [`types`] - Mesh, scene and bounding box types
//! - [`io`] - Upload validation and OBJ/DAE/STL/PLY loading
//! - [`parts`] - Extraction, simulation and classification of components
//! - [`pricing`] - Reference price tables and the snapshot store
//! - [`budget`] - Itemized cost composition

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod analyze;
mod error;
mod estimate;
mod format;
mod report;

pub use analyze::Analyzer;
pub use error::{FurnitureError, FurnitureResult};
pub use estimate::{Estimator, quote};
pub use format::{format_currency, format_size};
pub use report::{ProjectInfo, ProjectReport};

pub use furniture_parts::{AnalysisResult, FailureKind};

// =============================================================================
// Re-exports
// =============================================================================

/// Mesh, scene and bounding box types.
pub use mesh_types as types;

/// Upload validation and model loading.
pub use mesh_io as io;

/// Component extraction, simulation and classification.
pub use furniture_parts as parts;

/// Reference price tables.
pub use furniture_pricing as pricing;

/// Cost composition.
pub use furniture_budget as budget;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for estimating furniture.
///
/// # Usage
///
/// ```
/// use furniture::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Analyzer, Estimator, ProjectInfo, ProjectReport, format_currency, format_size, quote,
    };

    pub use furniture_budget::{BudgetConfiguration, BudgetResult, compose_budget};
    pub use furniture_parts::{
        AnalysisResult, Component, ComponentType, ExtractParams, FailureKind,
    };
    pub use furniture_pricing::{PricingStore, PricingTables, load_pricing};
    pub use mesh_io::UploadLimits;
}
