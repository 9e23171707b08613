//! Budget output types.
//!
//! Every monetary figure here is rounded to cents. Rounding happens once,
//! when a result is built from unrounded [`CostBreakdown`]s.

use furniture_parts::ComponentType;
use furniture_pricing::{AccessoryKind, PriceSource};
use serde::{Deserialize, Serialize};

use crate::config::BudgetConfiguration;
use crate::cost::CostBreakdown;

/// Round to cents.
#[must_use]
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round an area to 3 decimals.
pub(crate) fn round_area(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Cost per square metre, or 0 when there is no area.
#[must_use]
pub fn rate_per_m2(total: f64, area_m2: f64) -> f64 {
    if area_m2 > 0.0 { total / area_m2 } else { 0.0 }
}

/// Sheet material line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    /// Material id used.
    pub material_id: String,
    /// Product description.
    pub description: String,
    /// Manufacturer or supplier.
    pub supplier: String,
    /// Summed component area.
    pub net_area_m2: f64,
    /// Waste fraction applied.
    pub waste_fraction: f64,
    /// Area bought, including waste.
    pub gross_area_m2: f64,
    /// Price per square metre.
    pub price_per_m2: f64,
    /// Line total.
    pub total: f64,
}

/// One accessory line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryItem {
    /// Accessory kind.
    pub kind: AccessoryKind,
    /// Units required.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: f64,
    /// Quantity × unit price.
    pub total: f64,
}

/// Accessory lines for the whole project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryLines {
    /// Tier used.
    pub tier: String,
    /// Kinds with a non-zero quantity, in kind order.
    pub items: Vec<AccessoryItem>,
    /// Sum of item totals.
    pub total: f64,
}

/// Labor line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborLine {
    /// Complexity tier used.
    pub complexity: String,
    /// Area worked.
    pub area_m2: f64,
    /// Base rate × complexity multiplier.
    pub rate_per_m2: f64,
    /// Line total.
    pub total: f64,
}

/// Cutting line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingLine {
    /// Pieces cut.
    pub pieces: usize,
    /// Line total.
    pub total: f64,
}

/// Category subtotals, margin and final figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Material total.
    pub materials: f64,
    /// Accessory total.
    pub accessories: f64,
    /// Labor total.
    pub labor: f64,
    /// Cutting total.
    pub cutting: f64,
    /// Sum of the four categories.
    pub subtotal: f64,
    /// Margin fraction applied.
    pub margin_fraction: f64,
    /// Subtotal × margin fraction.
    pub margin: f64,
    /// Subtotal + margin.
    pub final_total: f64,
    /// Final total per square metre, 0 without area.
    pub rate_per_m2: f64,
}

impl BudgetSummary {
    /// Summarize an unrounded breakdown over `area_m2`.
    #[must_use]
    pub fn new(breakdown: &CostBreakdown, margin_fraction: f64, area_m2: f64) -> Self {
        let subtotal = breakdown.subtotal();
        let margin = subtotal * margin_fraction;
        let final_total = subtotal + margin;
        Self {
            materials: round_money(breakdown.material),
            accessories: round_money(breakdown.accessories),
            labor: round_money(breakdown.labor),
            cutting: round_money(breakdown.cutting),
            subtotal: round_money(subtotal),
            margin_fraction,
            margin: round_money(margin),
            final_total: round_money(final_total),
            rate_per_m2: round_money(rate_per_m2(final_total, area_m2)),
        }
    }
}

/// Cost of one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCost {
    /// Component id.
    pub id: usize,
    /// Component name.
    pub name: String,
    /// Component type.
    pub component_type: ComponentType,
    /// Component area.
    pub area_m2: f64,
    /// Accessories required, e.g. `2x Hinge`.
    pub accessories: Vec<String>,
    /// Costs and margin for this component alone.
    pub summary: BudgetSummary,
}

impl ComponentCost {
    /// Final total of this component.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.summary.final_total
    }
}

/// Itemized budget for one set of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    /// Material line.
    pub materials: MaterialLine,
    /// Accessory lines.
    pub accessories: AccessoryLines,
    /// Labor line.
    pub labor: LaborLine,
    /// Cutting line.
    pub cutting: CuttingLine,
    /// Project totals.
    pub summary: BudgetSummary,
    /// Per-component costs, in component order.
    pub components: Vec<ComponentCost>,
    /// Configuration the budget was composed with.
    pub configuration: BudgetConfiguration,
    /// Provenance of the prices.
    pub price_source: PriceSource,
}

impl BudgetResult {
    /// Total area priced, in square metres.
    #[must_use]
    pub fn total_area_m2(&self) -> f64 {
        self.materials.net_area_m2
    }

    /// Final total.
    #[must_use]
    pub fn final_total(&self) -> f64 {
        self.summary.final_total
    }
}

/// Format an accessory need as `2x Hinge`.
#[must_use]
pub(crate) fn accessory_label(kind: AccessoryKind, quantity: u32) -> String {
    format!("{quantity}x {kind}")
}
