//! Component and component type definitions.

use std::fmt;

use mesh_types::Aabb;
use serde::{Deserialize, Serialize};

/// Semantic role of a furniture part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// A cabinet identified by name, size unknown.
    Cabinet,
    /// Cabinet taller than 1.5 m.
    TallCabinet,
    /// Cabinet up to 1.5 m tall.
    LowCabinet,
    /// Drawer box or front.
    Drawer,
    /// Hinged door.
    Door,
    /// Horizontal shelf.
    Shelf,
    /// Worktop or table top.
    Countertop,
    /// Generic panel identified by name.
    Panel,
    /// Narrow upright side panel.
    SidePanel,
    /// Anything not matched by name or dimensions.
    Generic,
}

impl ComponentType {
    /// Every type, in display order.
    pub const ALL: [Self; 10] = [
        Self::Cabinet,
        Self::TallCabinet,
        Self::LowCabinet,
        Self::Drawer,
        Self::Door,
        Self::Shelf,
        Self::Countertop,
        Self::Panel,
        Self::SidePanel,
        Self::Generic,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cabinet => "Cabinet",
            Self::TallCabinet => "Tall Cabinet",
            Self::LowCabinet => "Low Cabinet",
            Self::Drawer => "Drawer",
            Self::Door => "Door",
            Self::Shelf => "Shelf",
            Self::Countertop => "Countertop",
            Self::Panel => "Panel",
            Self::SidePanel => "Side Panel",
            Self::Generic => "Component",
        }
    }

    /// Doors and drawers are hinged and take a handle.
    #[must_use]
    pub const fn is_door_or_drawer(self) -> bool {
        matches!(self, Self::Door | Self::Drawer)
    }

    /// Drawers run on a slide pair.
    #[must_use]
    pub const fn is_drawer(self) -> bool {
        matches!(self, Self::Drawer)
    }

    /// Shelves sit on four supports and get a rebate along their width.
    #[must_use]
    pub const fn is_shelf(self) -> bool {
        matches!(self, Self::Shelf)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Width, height and depth of a part in metres (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extents {
    /// Size along X.
    pub width: f64,
    /// Size along Y (up).
    pub height: f64,
    /// Size along Z.
    pub depth: f64,
}

impl Extents {
    /// Create extents from width, height and depth.
    #[must_use]
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Largest of the three extents.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.width.max(self.height).max(self.depth)
    }

    /// Smallest of the three extents.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.width.min(self.height).min(self.depth)
    }

    /// All extents multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor, self.depth * factor)
    }
}

/// Bounding box corners as plain arrays, in source model units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl From<&Aabb> for BoundingBox {
    fn from(aabb: &Aabb) -> Self {
        let [min, max] = aabb.to_arrays();
        Self { min, max }
    }
}

/// Round to a fixed number of decimal places.
#[must_use]
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// One furniture part with physical extents and a classified type.
///
/// Extents are stored to millimetre precision; area and volume are derived
/// from the stored extents, so they never disagree with them. A component is
/// never modified after construction.
///
/// # Example
///
/// ```
/// use furniture_parts::{Component, ComponentType, Extents};
///
/// let door = Component::new(1, "door", ComponentType::Door, Extents::new(0.45, 1.8, 0.02), 0.9);
/// assert!((door.area_m2() - 0.81).abs() < 1e-12);
/// assert!((door.volume_m3() - 0.0162).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    id: usize,
    name: String,
    component_type: ComponentType,
    width_m: f64,
    height_m: f64,
    depth_m: f64,
    area_m2: f64,
    volume_m3: f64,
    confidence: f64,
    bounds: BoundingBox,
}

impl Component {
    /// Create a component; the bounding box spans the origin to `extents`.
    ///
    /// Negative extents are taken by magnitude and confidence is clamped to
    /// `[0, 1]`.
    #[must_use]
    pub fn new(
        id: usize,
        name: impl Into<String>,
        component_type: ComponentType,
        extents: Extents,
        confidence: f64,
    ) -> Self {
        let width_m = round_to(extents.width.abs(), 3);
        let height_m = round_to(extents.height.abs(), 3);
        let depth_m = round_to(extents.depth.abs(), 3);
        Self {
            id,
            name: name.into(),
            component_type,
            width_m,
            height_m,
            depth_m,
            area_m2: round_to(width_m * height_m, 3),
            volume_m3: round_to(width_m * height_m * depth_m, 4),
            confidence: round_to(confidence.clamp(0.0, 1.0), 3),
            bounds: BoundingBox {
                min: [0.0; 3],
                max: [width_m, height_m, depth_m],
            },
        }
    }

    /// Replace the bounding box with the raw box the part was measured from.
    #[must_use]
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sequential id, starting at 1 within one analysis.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Source object name, or a synthetic name for simulated parts.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classified type.
    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Width in metres.
    #[must_use]
    pub const fn width_m(&self) -> f64 {
        self.width_m
    }

    /// Height in metres.
    #[must_use]
    pub const fn height_m(&self) -> f64 {
        self.height_m
    }

    /// Depth in metres.
    #[must_use]
    pub const fn depth_m(&self) -> f64 {
        self.depth_m
    }

    /// Face area, width × height, in square metres.
    #[must_use]
    pub const fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Box volume in cubic metres.
    #[must_use]
    pub const fn volume_m3(&self) -> f64 {
        self.volume_m3
    }

    /// Heuristic certainty of the type, in `[0, 1]`.
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Raw bounding box.
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Width + height + depth as one value.
    #[must_use]
    pub const fn extents(&self) -> Extents {
        Extents::new(self.width_m, self.height_m, self.depth_m)
    }
}
