//! Decomposition of a loaded model into measured parts.

use mesh_types::{Aabb, LoadedModel, MeshBounds};
use tracing::{debug, info, warn};

use crate::classify::{Classification, classify};
use crate::component::{BoundingBox, Component, Extents};
use crate::error::{PartsError, PartsResult};
use crate::params::ExtractParams;
use crate::simulate::simulate_parts;

/// Name given to the single component measured from an undivided mesh.
pub const MAIN_STRUCTURE: &str = "main_structure";

/// How a part's type is decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartOrigin {
    /// Measured from geometry; classified by name and dimensions.
    Measured,
    /// Inferred by the simulator with a fixed type and confidence.
    Synthetic(Classification),
}

/// A plausible part before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPart {
    /// Source object name or synthetic name.
    pub name: String,
    /// Extents in metres.
    pub extents: Extents,
    /// Raw bounding box in model units.
    pub bounds: BoundingBox,
    /// Measured or synthetic.
    pub origin: PartOrigin,
}

/// Parts that passed the plausibility filter and a count of those that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Plausible parts in model order.
    pub parts: Vec<RawPart>,
    /// Number of measured or synthetic parts dropped as implausible.
    pub dropped: usize,
}

impl Extraction {
    /// Classify the parts and number them from 1.
    ///
    /// # Errors
    ///
    /// - [`PartsError::EmptyModel`] if nothing was measured at all
    /// - [`PartsError::NoComponents`] if every part was dropped
    pub fn into_components(self) -> PartsResult<Vec<Component>> {
        if self.parts.is_empty() {
            return Err(if self.dropped == 0 {
                PartsError::EmptyModel
            } else {
                PartsError::no_components(self.dropped)
            });
        }

        Ok(self
            .parts
            .into_iter()
            .enumerate()
            .map(|(index, part)| {
                let Classification {
                    component_type,
                    confidence,
                } = match part.origin {
                    PartOrigin::Measured => classify(&part.extents, &part.name),
                    PartOrigin::Synthetic(fixed) => fixed,
                };
                Component::new(index + 1, part.name, component_type, part.extents, confidence)
                    .with_bounds(part.bounds)
            })
            .collect())
    }
}

/// Convert raw extents to metres.
///
/// If the largest extent exceeds the millimetre threshold all three are
/// scaled; otherwise they are taken as metres already.
///
/// # Example
///
/// ```
/// use furniture_parts::{ExtractParams, Extents, normalize_extents};
///
/// let params = ExtractParams::default();
/// let mm = normalize_extents(Extents::new(600.0, 2750.0, 450.0), &params);
/// assert!((mm.height - 2.75).abs() < 1e-12);
///
/// let m = normalize_extents(Extents::new(0.6, 2.75, 0.45), &params);
/// assert!((m.height - 2.75).abs() < 1e-12);
/// ```
#[must_use]
pub fn normalize_extents(raw: Extents, params: &ExtractParams) -> Extents {
    let raw = Extents::new(raw.width.abs(), raw.height.abs(), raw.depth.abs());
    if raw.max() > params.millimetre_threshold {
        raw.scaled(params.millimetre_scale)
    } else {
        raw
    }
}

/// Extents of a bounding box, Y up.
fn box_extents(aabb: &Aabb) -> Extents {
    let size = aabb.size();
    Extents::new(size.x, size.y, size.z)
}

/// Measure one geometry; `None` if it fails the plausibility filter.
fn measure(name: &str, aabb: &Aabb, params: &ExtractParams) -> Option<RawPart> {
    let raw = box_extents(aabb);
    let extents = normalize_extents(raw, params);
    debug!(
        name,
        raw_max = raw.max(),
        scaled = raw.max() > params.millimetre_threshold,
        width = extents.width,
        height = extents.height,
        depth = extents.depth,
        "Measured geometry"
    );

    admit(name, extents, params).then(|| RawPart {
        name: name.to_string(),
        extents,
        bounds: BoundingBox::from(aabb),
        origin: PartOrigin::Measured,
    })
}

/// Apply the plausibility filter, logging why a part is dropped.
fn admit(name: &str, extents: Extents, params: &ExtractParams) -> bool {
    let Extents {
        width,
        height,
        depth,
    } = extents;
    if params.is_plausible(width, height, depth) {
        return true;
    }
    if width > params.max_width || height > params.max_height || depth > params.max_depth {
        warn!(name, width, height, depth, "Dropping oversized geometry");
    } else {
        debug!(name, min_extent = extents.min(), "Dropping undersized geometry");
    }
    false
}

/// Decompose a model into plausible parts.
///
/// A scene yields one measured part per named object. A single mesh yields
/// one `main_structure` part and, when enabled, the simulator's synthetic
/// parts derived from its metre extents. Synthetic parts go through the same
/// plausibility filter and share the main structure's bounding box.
///
/// Dropping a part is not an error; it is counted in
/// [`Extraction::dropped`].
#[must_use]
pub fn extract_parts(model: &LoadedModel, params: &ExtractParams) -> Extraction {
    let mut extraction = Extraction::default();
    let mut keep = |part: Option<RawPart>| match part {
        Some(part) => extraction.parts.push(part),
        None => extraction.dropped += 1,
    };

    match model {
        LoadedModel::Scene(scene) => {
            for geometry in scene.geometries() {
                if let Some(aabb) = geometry.bounds_opt() {
                    keep(measure(&geometry.name, &aabb, params));
                }
            }
        }
        LoadedModel::Mesh(mesh) => {
            if let Some(aabb) = mesh.bounds_opt() {
                let main = measure(MAIN_STRUCTURE, &aabb, params);
                let synthetic = match &main {
                    Some(main) if params.simulate => simulate_parts(&main.extents),
                    _ => Vec::new(),
                };
                keep(main);

                let bounds = BoundingBox::from(&aabb);
                for part in synthetic {
                    let admitted = admit(&part.name, part.extents, params).then(|| RawPart {
                        name: part.name,
                        extents: part.extents,
                        bounds,
                        origin: PartOrigin::Synthetic(part.classification),
                    });
                    keep(admitted);
                }
            }
        }
    }

    info!(
        kept = extraction.parts.len(),
        dropped = extraction.dropped,
        "Extracted parts"
    );
    extraction
}

/// Extract, filter and classify in one step.
///
/// # Errors
///
/// Returns an error if no plausible part survives; see
/// [`Extraction::into_components`].
pub fn identify_components(model: &LoadedModel, params: &ExtractParams) -> PartsResult<Vec<Component>> {
    extract_parts(model, params).into_components()
}
