//! Furniture part identification from 3D models.
//!
//! Given a [`LoadedModel`](mesh_types::LoadedModel), this crate produces a
//! list of [`Component`]s: bounding-box parts in metres, each with a semantic
//! [`ComponentType`] and a confidence score.
//!
//! # Pipeline
//!
//! 1. **Extract** ([`extract_parts`]): one part per named scene object, or a
//!    `main_structure` part for an undivided mesh. Extents are normalized to
//!    metres (largest raw extent above 100 means millimetres) and implausible
//!    parts are dropped and counted.
//! 2. **Simulate** ([`simulate_parts`]): an undivided mesh gets synthetic
//!    doors and shelves (tall) or a worktop (low) inferred from its box.
//! 3. **Classify** ([`classify`]): a multilingual name keyword wins;
//!    otherwise an ordered table of [`DIMENSION_RULES`] decides.
//!
//! # Axes
//!
//! Models are taken as Y-up: width is the X extent, height Y, depth Z.
//!
//! # Example
//!
//! ```
//! use furniture_parts::{ComponentType, ExtractParams, identify_components};
//! use mesh_types::{IndexedMesh, LoadedModel, Vertex};
//!
//! // A 900 x 2100 x 600 mm wardrobe as one mesh
//! let mesh = IndexedMesh::from_parts(
//!     vec![Vertex::from_coords(0.0, 0.0, 0.0), Vertex::from_coords(900.0, 2100.0, 600.0)],
//!     vec![],
//! );
//! let components = identify_components(&LoadedModel::Mesh(mesh), &ExtractParams::default()).unwrap();
//!
//! assert_eq!(components[0].component_type(), ComponentType::TallCabinet);
//! assert_eq!(components[1].component_type(), ComponentType::Door);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod classify;
mod component;
mod error;
mod extract;
mod params;
mod result;
mod simulate;

pub use classify::{
    Axis, Classification, Condition, DIMENSION_RULES, DimensionRule, FALLBACK_CONFIDENCE,
    NAME_KEYWORDS, NAME_MATCH_CONFIDENCE, classify, match_dimensions, match_name,
};
pub use component::{BoundingBox, Component, ComponentType, Extents};
pub use error::{PartsError, PartsResult};
pub use extract::{
    Extraction, MAIN_STRUCTURE, PartOrigin, RawPart, extract_parts, identify_components,
    normalize_extents,
};
pub use params::ExtractParams;
pub use result::{AnalysisFailure, AnalysisResult, FailureKind};
pub use simulate::{
    BOARD_THICKNESS, SHELF_SPACING, SyntheticPart, TALL_UNIT_HEIGHT, WORKTOP_HEIGHT, simulate_parts,
};
