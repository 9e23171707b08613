//! Synthetic parts for models that arrive as one undivided mesh.
//!
//! Without object boundaries the only information is the overall box. A tall
//! box is assumed to be a wardrobe-like unit with a door and shelves; a very
//! low box is assumed to be a worktop. Anything in between gets no synthetic
//! parts.

use crate::classify::Classification;
use crate::component::{ComponentType, Extents};

/// Boxes taller than this get a door and shelves, in metres.
pub const TALL_UNIT_HEIGHT: f64 = 1.5;

/// Boxes lower than this are treated as a worktop, in metres.
pub const WORKTOP_HEIGHT: f64 = 0.3;

/// Nominal board thickness of synthetic doors and shelves, in metres.
pub const BOARD_THICKNESS: f64 = 0.02;

/// Vertical spacing used to estimate the number of shelves, in metres.
pub const SHELF_SPACING: f64 = 0.4;

/// A part inferred from the overall box rather than measured.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticPart {
    /// Generated part name.
    pub name: String,
    /// Inferred extents in metres.
    pub extents: Extents,
    /// Fixed type and confidence.
    pub classification: Classification,
}

impl SyntheticPart {
    fn new(name: impl Into<String>, extents: Extents, component_type: ComponentType, confidence: f64) -> Self {
        Self {
            name: name.into(),
            extents,
            classification: Classification {
                component_type,
                confidence,
            },
        }
    }
}

/// Synthesize parts from the overall extents of a single mesh.
///
/// Parts are returned unfiltered; a very narrow box can yield a door or
/// shelf with a negative or tiny width, which the extractor then drops.
///
/// # Example
///
/// ```
/// use furniture_parts::{ComponentType, Extents, simulate_parts};
///
/// let parts = simulate_parts(&Extents::new(1.0, 2.0, 0.6));
/// assert_eq!(parts[0].classification.component_type, ComponentType::Door);
/// // max(2, floor(2.0 / 0.4)) shelves
/// assert_eq!(parts.len(), 1 + 5);
/// ```
#[must_use]
pub fn simulate_parts(overall: &Extents) -> Vec<SyntheticPart> {
    let Extents {
        width,
        height,
        depth,
    } = *overall;

    if height > TALL_UNIT_HEIGHT {
        let door = SyntheticPart::new(
            "left_door",
            Extents::new(width / 2.0 - 0.05, height * 0.9, BOARD_THICKNESS),
            ComponentType::Door,
            0.85,
        );

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let shelf_count = ((height / SHELF_SPACING).floor() as usize).max(2);
        let shelves = (1..=shelf_count).map(|i| {
            SyntheticPart::new(
                format!("shelf_{i}"),
                Extents::new(width - 0.1, BOARD_THICKNESS, depth - 0.1),
                ComponentType::Shelf,
                0.80,
            )
        });

        std::iter::once(door).chain(shelves).collect()
    } else if height < WORKTOP_HEIGHT {
        vec![SyntheticPart::new(
            "countertop",
            *overall,
            ComponentType::Countertop,
            0.90,
        )]
    } else {
        Vec::new()
    }
}
