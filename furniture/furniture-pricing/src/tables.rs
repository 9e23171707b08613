//! Reference price tables.
//!
//! All prices are in Brazilian reais (BRL). Lookups by an unknown key fall
//! back to a fixed entry ([`DEFAULT_MATERIAL`], [`DEFAULT_ACCESSORY_TIER`],
//! [`DEFAULT_LABOR_COMPLEXITY`]) and say so in the returned [`Resolved`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PricingError, PricingResult};

/// Material used when the requested id is unknown.
pub const DEFAULT_MATERIAL: &str = "mdf_15mm";

/// Accessory tier used when the requested tier is unknown.
pub const DEFAULT_ACCESSORY_TIER: &str = "common";

/// Labor complexity used when the requested complexity is unknown.
pub const DEFAULT_LABOR_COMPLEXITY: &str = "medium";

/// Sheet material price and cutting loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Price per square metre.
    pub price_per_m2: f64,
    /// Extra material bought to cover cutting loss, in `[0, 1)`.
    pub waste_fraction: f64,
    /// Product description.
    pub description: String,
    /// Manufacturer or supplier.
    pub supplier: String,
}

/// Hardware item priced per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryKind {
    /// Cabinet hinge.
    Hinge,
    /// Door or drawer handle.
    Handle,
    /// Drawer slide pair.
    Slide,
    /// Shelf support pin.
    ShelfSupport,
    /// Lock.
    Lock,
    /// Screw and fastener kit.
    FastenerKit,
}

impl AccessoryKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 6] = [
        Self::Hinge,
        Self::Handle,
        Self::Slide,
        Self::ShelfSupport,
        Self::Lock,
        Self::FastenerKit,
    ];

    /// Field name used in pricing files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hinge => "hinge",
            Self::Handle => "handle",
            Self::Slide => "slide",
            Self::ShelfSupport => "shelf_support",
            Self::Lock => "lock",
            Self::FastenerKit => "fastener_kit",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Hinge => "Hinge",
            Self::Handle => "Handle",
            Self::Slide => "Slide pair",
            Self::ShelfSupport => "Shelf support",
            Self::Lock => "Lock",
            Self::FastenerKit => "Fastener kit",
        }
    }
}

impl fmt::Display for AccessoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Unit prices of every accessory kind for one quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessoryPrices {
    /// Per hinge.
    pub hinge: f64,
    /// Per handle.
    pub handle: f64,
    /// Per slide pair.
    pub slide: f64,
    /// Per shelf support.
    pub shelf_support: f64,
    /// Per lock.
    pub lock: f64,
    /// Per fastener kit.
    pub fastener_kit: f64,
}

impl AccessoryPrices {
    /// Unit price of `kind`.
    #[must_use]
    pub const fn price(&self, kind: AccessoryKind) -> f64 {
        match kind {
            AccessoryKind::Hinge => self.hinge,
            AccessoryKind::Handle => self.handle,
            AccessoryKind::Slide => self.slide,
            AccessoryKind::ShelfSupport => self.shelf_support,
            AccessoryKind::Lock => self.lock,
            AccessoryKind::FastenerKit => self.fastener_kit,
        }
    }
}

/// Labor base rate and complexity multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborRates {
    /// Base labor cost per square metre.
    pub base_rate_per_m2: f64,
    /// Complexity tier to multiplier over the base rate.
    pub multipliers: BTreeMap<String, f64>,
}

/// Workshop cutting and machining unit costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuttingParameters {
    /// Straight cut, per linear metre.
    pub straight_cut_per_m: f64,
    /// Curved cut, per linear metre.
    pub curved_cut_per_m: f64,
    /// Per hinge bore.
    pub hinge_bore: f64,
    /// Rebate, per linear metre.
    pub rebate_per_m: f64,
    /// Chamfer, per linear metre.
    pub chamfer_per_m: f64,
    /// Minimum cutting charge per piece.
    pub minimum_per_piece: f64,
}

/// Where and when the prices were captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSource {
    /// Supplier name.
    pub supplier: String,
    /// Supplier website.
    pub url: String,
    /// Capture date, written `YYYY-MM-DD`.
    pub captured_on: NaiveDate,
    /// Caveats about the figures.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// A table entry found by key, possibly after falling back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a, T> {
    /// Key the value was found under.
    pub key: &'a str,
    /// The entry.
    pub value: &'a T,
    /// Whether the requested key was unknown.
    pub fell_back: bool,
}

fn resolve<'a, T>(
    table: &'a BTreeMap<String, T>,
    table_name: &'static str,
    requested: &str,
    fallback: &'static str,
) -> PricingResult<Resolved<'a, T>> {
    if let Some((key, value)) = table.get_key_value(requested) {
        return Ok(Resolved {
            key,
            value,
            fell_back: false,
        });
    }
    let (key, value) = table
        .get_key_value(fallback)
        .ok_or(PricingError::MissingFallback {
            table: table_name,
            key: fallback,
        })?;
    warn!(table = table_name, requested, fallback, "Unknown pricing key, using fallback");
    Ok(Resolved {
        key,
        value,
        fell_back: true,
    })
}

/// One immutable snapshot of all reference prices.
///
/// # Example
///
/// ```
/// use furniture_pricing::{AccessoryKind, PricingTables};
///
/// let tables = PricingTables::builtin();
/// let mdf = tables.material("mdf_15mm").unwrap();
/// assert!((mdf.value.price_per_m2 - 69.15).abs() < 1e-10);
///
/// // Unknown ids fall back to MDF 15mm
/// let unknown = tables.material("granite").unwrap();
/// assert!(unknown.fell_back);
/// assert_eq!(unknown.key, "mdf_15mm");
///
/// let common = tables.accessories("common").unwrap();
/// assert!((common.value.price(AccessoryKind::Hinge) - 12.50).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTables {
    /// Provenance of the figures.
    pub source: PriceSource,
    /// Material id to spec.
    pub materials: BTreeMap<String, MaterialSpec>,
    /// Quality tier to accessory prices.
    pub accessories: BTreeMap<String, AccessoryPrices>,
    /// Labor rates.
    pub labor: LaborRates,
    /// Cutting costs.
    pub cutting: CuttingParameters,
}

impl Default for PricingTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PricingTables {
    /// Compiled-in prices from Léo Madeiras, captured 2025-06-30.
    #[must_use]
    pub fn builtin() -> Self {
        let material = |price_per_m2: f64, waste_fraction: f64, description: &str, supplier: &str| {
            MaterialSpec {
                price_per_m2,
                waste_fraction,
                description: description.to_string(),
                supplier: supplier.to_string(),
            }
        };

        let materials = BTreeMap::from([
            (
                "mdf_15mm".to_string(),
                material(69.15, 0.15, "MDF Branco Ártico Texturizado Ultra Premium 15mm", "Duratex"),
            ),
            (
                "mdf_18mm".to_string(),
                material(77.85, 0.15, "MDF Branco Ártico Texturizado Ultra Premium 18mm", "Duratex"),
            ),
            (
                "plywood_15mm".to_string(),
                material(64.00, 0.12, "Compensado Paricá 15mm 100% Eucalipto", "Nacional"),
            ),
            (
                "plywood_10mm".to_string(),
                material(52.50, 0.12, "Compensado Paricá 10mm 100% Eucalipto", "Nacional"),
            ),
            (
                "mdp_15mm".to_string(),
                material(58.00, 0.18, "MDP Melamínico 15mm", "Nacional"),
            ),
            (
                "melamine_15mm".to_string(),
                material(89.50, 0.10, "Melamina Texturizada 15mm", "Nacional"),
            ),
        ]);

        let accessories = BTreeMap::from([
            (
                "common".to_string(),
                AccessoryPrices {
                    hinge: 12.50,
                    handle: 15.80,
                    slide: 45.00,
                    shelf_support: 8.50,
                    lock: 25.00,
                    fastener_kit: 3.50,
                },
            ),
            (
                "premium".to_string(),
                AccessoryPrices {
                    hinge: 28.50,
                    handle: 45.00,
                    slide: 89.00,
                    shelf_support: 18.50,
                    lock: 65.00,
                    fastener_kit: 8.50,
                },
            ),
        ]);

        let labor = LaborRates {
            base_rate_per_m2: 120.00,
            multipliers: BTreeMap::from([
                ("simple".to_string(), 1.0),
                ("medium".to_string(), 1.3),
                ("complex".to_string(), 1.7),
                ("premium".to_string(), 2.2),
            ]),
        };

        let cutting = CuttingParameters {
            straight_cut_per_m: 2.50,
            curved_cut_per_m: 4.50,
            hinge_bore: 1.50,
            rebate_per_m: 3.50,
            chamfer_per_m: 2.00,
            minimum_per_piece: 15.00,
        };

        let source = PriceSource {
            supplier: "Léo Madeiras".to_string(),
            url: "https://www.leomadeiras.com.br/".to_string(),
            captured_on: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default(),
            notes: vec![
                "Prices collected from the supplier's official website".to_string(),
                "Figures may vary with stock availability and promotions".to_string(),
                "Cutting costs estimated from common workshop practice".to_string(),
                "Waste fractions based on joinery experience".to_string(),
            ],
        };

        Self {
            source,
            materials,
            accessories,
            labor,
            cutting,
        }
    }

    /// Material spec by id, falling back to [`DEFAULT_MATERIAL`].
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingFallback`] if neither entry exists.
    pub fn material(&self, id: &str) -> PricingResult<Resolved<'_, MaterialSpec>> {
        resolve(&self.materials, "materials", id, DEFAULT_MATERIAL)
    }

    /// Accessory prices by tier, falling back to [`DEFAULT_ACCESSORY_TIER`].
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingFallback`] if neither entry exists.
    pub fn accessories(&self, tier: &str) -> PricingResult<Resolved<'_, AccessoryPrices>> {
        resolve(&self.accessories, "accessories", tier, DEFAULT_ACCESSORY_TIER)
    }

    /// Labor multiplier by complexity, falling back to
    /// [`DEFAULT_LABOR_COMPLEXITY`].
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingFallback`] if neither entry exists.
    pub fn labor_multiplier(&self, complexity: &str) -> PricingResult<Resolved<'_, f64>> {
        resolve(
            &self.labor.multipliers,
            "labor.multipliers",
            complexity,
            DEFAULT_LABOR_COMPLEXITY,
        )
    }

    /// Labor cost per square metre for a complexity tier.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingFallback`] if neither the tier nor the
    /// fallback tier exists.
    pub fn labor_rate_per_m2(&self, complexity: &str) -> PricingResult<f64> {
        Ok(self.labor.base_rate_per_m2 * self.labor_multiplier(complexity)?.value)
    }

    /// Check every value is in range and every fallback entry exists.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> PricingResult<()> {
        fn non_negative(field: String, value: f64) -> PricingResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(PricingError::validation(field, "must be a non-negative number"))
            }
        }

        for (id, spec) in &self.materials {
            non_negative(format!("materials.{id}.price_per_m2"), spec.price_per_m2)?;
            if !(0.0..1.0).contains(&spec.waste_fraction) {
                return Err(PricingError::validation(
                    format!("materials.{id}.waste_fraction"),
                    "must be in [0, 1)",
                ));
            }
        }

        for (tier, prices) in &self.accessories {
            for kind in AccessoryKind::ALL {
                non_negative(format!("accessories.{tier}.{}", kind.key()), prices.price(kind))?;
            }
        }

        non_negative("labor.base_rate_per_m2".to_string(), self.labor.base_rate_per_m2)?;
        for (complexity, multiplier) in &self.labor.multipliers {
            if !(multiplier.is_finite() && *multiplier > 0.0) {
                return Err(PricingError::validation(
                    format!("labor.multipliers.{complexity}"),
                    "must be greater than 0",
                ));
            }
        }

        let cutting = &self.cutting;
        for (name, value) in [
            ("straight_cut_per_m", cutting.straight_cut_per_m),
            ("curved_cut_per_m", cutting.curved_cut_per_m),
            ("hinge_bore", cutting.hinge_bore),
            ("rebate_per_m", cutting.rebate_per_m),
            ("chamfer_per_m", cutting.chamfer_per_m),
            ("minimum_per_piece", cutting.minimum_per_piece),
        ] {
            non_negative(format!("cutting.{name}"), value)?;
        }

        if !self.materials.contains_key(DEFAULT_MATERIAL) {
            return Err(PricingError::MissingFallback {
                table: "materials",
                key: DEFAULT_MATERIAL,
            });
        }
        if !self.accessories.contains_key(DEFAULT_ACCESSORY_TIER) {
            return Err(PricingError::MissingFallback {
                table: "accessories",
                key: DEFAULT_ACCESSORY_TIER,
            });
        }
        if !self.labor.multipliers.contains_key(DEFAULT_LABOR_COMPLEXITY) {
            return Err(PricingError::MissingFallback {
                table: "labor.multipliers",
                key: DEFAULT_LABOR_COMPLEXITY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn builtin_is_valid() {
        assert!(PricingTables::builtin().validate().is_ok());
    }

    #[test]
    fn builtin_figures() {
        let tables = PricingTables::builtin();
        assert_eq!(tables.materials.len(), 6);
        assert_relative_eq!(tables.material("mdp_15mm").map(|r| r.value.waste_fraction).unwrap_or_default(), 0.18);

        let premium = tables.accessories("premium").map(|r| *r.value).ok();
        assert_eq!(premium.map(|p| p.price(AccessoryKind::Slide)), Some(89.00));

        assert_relative_eq!(tables.labor_rate_per_m2("medium").unwrap_or_default(), 156.0, epsilon = 1e-9);
        assert_relative_eq!(tables.labor_rate_per_m2("premium").unwrap_or_default(), 264.0, epsilon = 1e-9);
        assert_eq!(tables.source.captured_on.to_string(), "2025-06-30");
    }

    #[test]
    fn unknown_keys_fall_back() {
        let tables = PricingTables::builtin();

        let labor = tables.labor_multiplier("baroque");
        assert!(matches!(labor, Ok(Resolved { key: "medium", fell_back: true, .. })));

        let tier = tables.accessories("gold");
        assert!(matches!(tier, Ok(Resolved { key: "common", fell_back: true, .. })));

        let known = tables.material("melamine_15mm");
        assert!(matches!(known, Ok(Resolved { fell_back: false, .. })));
    }

    #[test]
    fn missing_fallback_is_error() {
        let mut tables = PricingTables::builtin();
        tables.labor.multipliers.remove("medium");

        assert!(matches!(
            tables.labor_multiplier("unknown"),
            Err(PricingError::MissingFallback { key: "medium", .. })
        ));
        assert!(matches!(tables.validate(), Err(PricingError::MissingFallback { .. })));
        // Known keys still resolve
        assert!(tables.labor_multiplier("complex").is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range() {
        let mut tables = PricingTables::builtin();
        if let Some(spec) = tables.materials.get_mut("mdf_18mm") {
            spec.waste_fraction = 1.0;
        }
        let err = tables.validate().err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("materials.mdf_18mm.waste_fraction"));

        let mut tables = PricingTables::builtin();
        tables.labor.multipliers.insert("free".to_string(), 0.0);
        assert!(tables.validate().is_err());

        let mut tables = PricingTables::builtin();
        if let Some(prices) = tables.accessories.get_mut("premium") {
            prices.shelf_support = -1.0;
        }
        let err = tables.validate().err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("accessories.premium.shelf_support"));

        let mut tables = PricingTables::builtin();
        tables.cutting.minimum_per_piece = f64::NAN;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn accessory_display_names() {
        assert_eq!(AccessoryKind::ShelfSupport.to_string(), "Shelf support");
        assert_eq!(AccessoryKind::Slide.to_string(), "Slide pair");
    }
}
