//! Four-category cost of a single component.
//!
//! Every figure in a budget, aggregate or per component, comes from
//! [`RateCard::cost_of`]. The project totals are the sum of the
//! per-component breakdowns, so the two can never drift apart.

use std::iter::Sum;
use std::ops::Add;

use furniture_parts::{Component, ComponentType};
use furniture_pricing::{AccessoryKind, AccessoryPrices, CuttingParameters, MaterialSpec, PricingTables};

use crate::config::BudgetConfiguration;
use crate::error::ComposeResult;

/// Accessory quantities one component requires.
///
/// Doors and drawers take two hinges and a handle, drawers also a slide
/// pair, shelves four supports.
///
/// # Example
///
/// ```
/// use furniture_budget::accessory_needs;
/// use furniture_parts::ComponentType;
/// use furniture_pricing::AccessoryKind;
///
/// let drawer = accessory_needs(ComponentType::Drawer);
/// assert_eq!(drawer, vec![(AccessoryKind::Hinge, 2), (AccessoryKind::Handle, 1), (AccessoryKind::Slide, 1)]);
/// ```
#[must_use]
pub fn accessory_needs(component_type: ComponentType) -> Vec<(AccessoryKind, u32)> {
    let mut needs = Vec::new();
    if component_type.is_door_or_drawer() {
        needs.push((AccessoryKind::Hinge, 2));
        needs.push((AccessoryKind::Handle, 1));
    }
    if component_type.is_drawer() {
        needs.push((AccessoryKind::Slide, 1));
    }
    if component_type.is_shelf() {
        needs.push((AccessoryKind::ShelfSupport, 4));
    }
    needs
}

/// Unrounded cost per category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostBreakdown {
    /// Sheet material including waste.
    pub material: f64,
    /// Hardware.
    pub accessories: f64,
    /// Labor.
    pub labor: f64,
    /// Cutting and machining.
    pub cutting: f64,
}

impl CostBreakdown {
    /// Sum of the four categories, before margin.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.material + self.accessories + self.labor + self.cutting
    }
}

impl Add for CostBreakdown {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            material: self.material + other.material,
            accessories: self.accessories + other.accessories,
            labor: self.labor + other.labor,
            cutting: self.cutting + other.cutting,
        }
    }
}

impl Sum for CostBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Prices resolved for one configuration against one pricing snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RateCard<'a> {
    /// Material id actually used.
    pub material_id: &'a str,
    /// Material spec.
    pub material: &'a MaterialSpec,
    /// Whether the requested material was unknown.
    pub material_fell_back: bool,
    /// Accessory tier actually used.
    pub accessory_tier: &'a str,
    /// Accessory prices.
    pub accessories: &'a AccessoryPrices,
    /// Labor complexity actually used.
    pub labor_complexity: &'a str,
    /// Labor cost per square metre.
    pub labor_rate_per_m2: f64,
    /// Cutting costs.
    pub cutting: &'a CuttingParameters,
}

impl<'a> RateCard<'a> {
    /// Look up every price the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables lack a fallback entry.
    pub fn resolve(config: &BudgetConfiguration, tables: &'a PricingTables) -> ComposeResult<Self> {
        let material = tables.material(&config.material)?;
        let accessories = tables.accessories(&config.accessory_quality)?;
        let multiplier = tables.labor_multiplier(&config.labor_complexity)?;
        Ok(Self {
            material_id: material.key,
            material: material.value,
            material_fell_back: material.fell_back,
            accessory_tier: accessories.key,
            accessories: accessories.value,
            labor_complexity: multiplier.key,
            labor_rate_per_m2: tables.labor.base_rate_per_m2 * multiplier.value,
            cutting: &tables.cutting,
        })
    }

    /// Material cost of `area_m2` including waste.
    #[must_use]
    pub fn material_cost(&self, area_m2: f64) -> f64 {
        area_m2 * (1.0 + self.material.waste_fraction) * self.material.price_per_m2
    }

    /// Cutting cost of one piece.
    ///
    /// The perimeter is cut straight, subject to the per-piece minimum; doors
    /// and drawers add four hinge bores, shelves a rebate along their width.
    #[must_use]
    pub fn cutting_cost(&self, component: &Component) -> f64 {
        let component_type = component.component_type();
        let perimeter = 2.0 * (component.width_m() + component.height_m());
        let mut cost = (perimeter * self.cutting.straight_cut_per_m).max(self.cutting.minimum_per_piece);
        if component_type.is_door_or_drawer() {
            cost += 4.0 * self.cutting.hinge_bore;
        }
        if component_type.is_shelf() {
            cost += component.width_m() * self.cutting.rebate_per_m;
        }
        cost
    }

    /// Accessory cost of one component.
    #[must_use]
    pub fn accessory_cost(&self, component_type: ComponentType) -> f64 {
        accessory_needs(component_type)
            .into_iter()
            .map(|(kind, quantity)| f64::from(quantity) * self.accessories.price(kind))
            .sum()
    }

    /// Four-category cost of one component.
    #[must_use]
    pub fn cost_of(&self, component: &Component) -> CostBreakdown {
        let area = component.area_m2();
        CostBreakdown {
            material: self.material_cost(area),
            accessories: self.accessory_cost(component.component_type()),
            labor: area * self.labor_rate_per_m2,
            cutting: self.cutting_cost(component),
        }
    }
}

/// Four-category cost of one component under `config` and `tables`.
///
/// # Errors
///
/// Returns an error if the tables lack a fallback entry.
pub fn cost_of(
    component: &Component,
    config: &BudgetConfiguration,
    tables: &PricingTables,
) -> ComposeResult<CostBreakdown> {
    Ok(RateCard::resolve(config, tables)?.cost_of(component))
}
