//! Heuristic classification of parts by name and dimensions.
//!
//! A name keyword always wins. Otherwise the [`DIMENSION_RULES`] table is
//! scanned in order and the first rule whose conditions all hold decides the
//! type. The order of that table is part of the behavior: several ranges
//! overlap (a 0.9 × 0.1 × 0.5 m part satisfies both the countertop and
//! drawer rules) and the earlier rule wins.

use serde::Serialize;
use tracing::debug;

use crate::component::{ComponentType, Extents};

/// Confidence assigned to a name keyword match.
pub const NAME_MATCH_CONFIDENCE: f64 = 0.9;

/// Confidence assigned when nothing matches.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Name keywords per type, in priority order.
///
/// A name matching keywords of several types takes the first type listed.
pub const NAME_KEYWORDS: &[(ComponentType, &[&str])] = &[
    (
        ComponentType::Cabinet,
        &["armário", "armario", "cabinet", "wardrobe", "closet"],
    ),
    (ComponentType::Drawer, &["gaveta", "drawer", "cajón", "cajon"]),
    (ComponentType::Door, &["porta", "door", "puerta"]),
    (ComponentType::Shelf, &["prateleira", "shelf", "estante"]),
    (ComponentType::Countertop, &["bancada", "countertop", "mesa"]),
    (ComponentType::Panel, &["painel", "panel", "lateral"]),
];

/// Which extent a condition looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// X extent.
    Width,
    /// Y extent.
    Height,
    /// Z extent.
    Depth,
}

/// A strict comparison against a threshold in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Extent strictly below the threshold.
    Below(Axis, f64),
    /// Extent strictly above the threshold.
    Above(Axis, f64),
}

impl Condition {
    /// Whether the extents satisfy this condition.
    #[must_use]
    pub fn holds(&self, extents: &Extents) -> bool {
        let pick = |axis: Axis| match axis {
            Axis::Width => extents.width,
            Axis::Height => extents.height,
            Axis::Depth => extents.depth,
        };
        match *self {
            Self::Below(axis, limit) => pick(axis) < limit,
            Self::Above(axis, limit) => pick(axis) > limit,
        }
    }
}

/// One row of the dimension rule table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionRule {
    /// Type assigned when every condition holds.
    pub component_type: ComponentType,
    /// Confidence assigned with it.
    pub confidence: f64,
    /// Conditions, all of which must hold.
    pub conditions: &'static [Condition],
}

impl DimensionRule {
    /// Whether every condition holds for `extents`.
    #[must_use]
    pub fn matches(&self, extents: &Extents) -> bool {
        self.conditions.iter().all(|c| c.holds(extents))
    }
}

use Axis::{Depth, Height, Width};
use Condition::{Above, Below};

/// Dimension rules, evaluated top to bottom; first match wins.
pub const DIMENSION_RULES: &[DimensionRule] = &[
    DimensionRule {
        component_type: ComponentType::Countertop,
        confidence: 0.8,
        conditions: &[Below(Height, 0.15), Above(Width, 0.8), Above(Depth, 0.4)],
    },
    DimensionRule {
        component_type: ComponentType::Shelf,
        confidence: 0.7,
        conditions: &[Below(Height, 0.05), Above(Width, 0.3)],
    },
    DimensionRule {
        component_type: ComponentType::Door,
        confidence: 0.7,
        conditions: &[Above(Height, 0.4), Above(Width, 0.3), Below(Depth, 0.1)],
    },
    DimensionRule {
        component_type: ComponentType::Drawer,
        confidence: 0.7,
        conditions: &[Below(Height, 0.25), Above(Width, 0.3), Above(Depth, 0.3)],
    },
    DimensionRule {
        component_type: ComponentType::TallCabinet,
        confidence: 0.8,
        conditions: &[Above(Height, 1.5), Above(Width, 0.4), Above(Depth, 0.3)],
    },
    DimensionRule {
        component_type: ComponentType::LowCabinet,
        confidence: 0.7,
        conditions: &[Above(Height, 0.5), Above(Width, 0.4), Above(Depth, 0.3)],
    },
    DimensionRule {
        component_type: ComponentType::SidePanel,
        confidence: 0.6,
        conditions: &[Above(Height, 0.5), Below(Width, 0.2)],
    },
];

/// Outcome of classifying one part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Assigned type.
    pub component_type: ComponentType,
    /// Confidence of the assignment.
    pub confidence: f64,
}

/// Type whose keywords appear in `name`, if any.
///
/// Matching is case-insensitive substring search.
#[must_use]
pub fn match_name(name: &str) -> Option<ComponentType> {
    let lowered = name.to_lowercase();
    NAME_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(component_type, _)| *component_type)
}

/// First dimension rule matching `extents`, if any.
#[must_use]
pub fn match_dimensions(extents: &Extents) -> Option<&'static DimensionRule> {
    DIMENSION_RULES.iter().find(|rule| rule.matches(extents))
}

/// Classify a part from its metre extents and source name.
///
/// # Example
///
/// ```
/// use furniture_parts::{ComponentType, Extents, classify};
///
/// // Dimensions alone say "shelf"...
/// let by_size = classify(&Extents::new(0.8, 0.02, 0.3), "part_7");
/// assert_eq!(by_size.component_type, ComponentType::Shelf);
///
/// // ...but the name wins.
/// let by_name = classify(&Extents::new(0.8, 0.02, 0.3), "Porta_Esquerda");
/// assert_eq!(by_name.component_type, ComponentType::Door);
/// assert!((by_name.confidence - 0.9).abs() < 1e-12);
/// ```
#[must_use]
pub fn classify(extents: &Extents, name: &str) -> Classification {
    let classification = if let Some(component_type) = match_name(name) {
        Classification {
            component_type,
            confidence: NAME_MATCH_CONFIDENCE,
        }
    } else if let Some(rule) = match_dimensions(extents) {
        Classification {
            component_type: rule.component_type,
            confidence: rule.confidence,
        }
    } else {
        Classification {
            component_type: ComponentType::Generic,
            confidence: FALLBACK_CONFIDENCE,
        }
    };

    debug!(
        name,
        component_type = %classification.component_type,
        confidence = classification.confidence,
        "Classified part"
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn by_size(width: f64, height: f64, depth: f64) -> Classification {
        classify(&Extents::new(width, height, depth), "object_1")
    }

    #[test]
    fn every_rule_reachable() {
        let cases = [
            ((1.2, 0.04, 0.6), ComponentType::Countertop, 0.8),
            ((0.8, 0.02, 0.3), ComponentType::Shelf, 0.7),
            ((0.45, 1.8, 0.02), ComponentType::Door, 0.7),
            ((0.5, 0.2, 0.45), ComponentType::Drawer, 0.7),
            ((0.9, 2.1, 0.6), ComponentType::TallCabinet, 0.8),
            ((0.6, 0.72, 0.55), ComponentType::LowCabinet, 0.7),
            ((0.15, 0.8, 0.5), ComponentType::SidePanel, 0.6),
            ((0.2, 0.2, 0.2), ComponentType::Generic, 0.5),
        ];
        for ((w, h, d), expected, confidence) in cases {
            let got = by_size(w, h, d);
            assert_eq!(got.component_type, expected, "{w} x {h} x {d}");
            assert_relative_eq!(got.confidence, confidence);
        }
    }

    #[test]
    fn countertop_rule_precedes_drawer_rule() {
        // Satisfies both countertop and drawer conditions
        let got = by_size(0.9, 0.1, 0.5);
        assert_eq!(got.component_type, ComponentType::Countertop);
    }

    #[test]
    fn shelf_rule_precedes_drawer_rule() {
        let got = by_size(0.6, 0.03, 0.4);
        assert_eq!(got.component_type, ComponentType::Shelf);
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly 1.5 m tall is not tall
        assert_eq!(by_size(0.6, 1.5, 0.5).component_type, ComponentType::LowCabinet);
        // Exactly 0.05 m is not shelf-thin
        assert_ne!(by_size(0.6, 0.05, 0.2).component_type, ComponentType::Shelf);
    }

    #[test]
    fn name_match_is_case_insensitive_and_multilingual() {
        for name in ["GAVETA_1", "Drawer front", "cajón", "Cajon-2"] {
            assert_eq!(match_name(name), Some(ComponentType::Drawer), "{name}");
        }
        assert_eq!(match_name("ARMÁRIO"), Some(ComponentType::Cabinet));
        assert_eq!(match_name("Puerta izquierda"), Some(ComponentType::Door));
        assert_eq!(match_name("estante"), Some(ComponentType::Shelf));
        assert_eq!(match_name("Mesa"), Some(ComponentType::Countertop));
        assert_eq!(match_name("lateral_dir"), Some(ComponentType::Panel));
        assert_eq!(match_name("object_12"), None);
    }

    #[test]
    fn name_priority_when_several_match() {
        // Cabinet before Door
        assert_eq!(match_name("cabinet_door"), Some(ComponentType::Cabinet));
        // Drawer before Door
        assert_eq!(match_name("door_drawer"), Some(ComponentType::Drawer));
        // Shelf before Panel
        assert_eq!(match_name("shelf panel"), Some(ComponentType::Shelf));
    }

    #[test]
    fn name_outranks_dimensions() {
        let got = classify(&Extents::new(0.9, 2.1, 0.6), "countertop");
        assert_eq!(got.component_type, ComponentType::Countertop);
        assert_relative_eq!(got.confidence, NAME_MATCH_CONFIDENCE);
    }

    #[test]
    fn confidences_in_unit_interval() {
        for rule in DIMENSION_RULES {
            assert!((0.0..=1.0).contains(&rule.confidence));
        }
    }
}
