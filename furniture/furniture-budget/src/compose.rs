//! Budget composition.

use std::collections::BTreeMap;

use furniture_parts::{AnalysisResult, Component};
use furniture_pricing::{AccessoryKind, PricingTables};
use tracing::{debug, info};

use crate::config::BudgetConfiguration;
use crate::cost::{CostBreakdown, RateCard, accessory_needs};
use crate::error::{BudgetError, ComposeResult};
use crate::result::{
    AccessoryItem, AccessoryLines, BudgetResult, BudgetSummary, ComponentCost, CuttingLine,
    LaborLine, MaterialLine, accessory_label, round_area, round_money,
};

/// Compose an itemized budget for `components`.
///
/// Each component is costed once with [`RateCard::cost_of`]; project
/// categories are the sums of those costs, so per-component subtotals add up
/// to the project subtotal. Margin is applied to the project subtotal and,
/// separately, to each component's subtotal.
///
/// # Errors
///
/// - [`BudgetError::InvalidMargin`] if the margin is outside `[0, 1)`
/// - [`BudgetError::NoComponents`] if `components` is empty
/// - [`BudgetError::Pricing`] if the tables lack a fallback entry
///
/// # Example
///
/// ```
/// use furniture_budget::{BudgetConfiguration, compose_budget};
/// use furniture_parts::{Component, ComponentType, Extents};
/// use furniture_pricing::PricingTables;
///
/// let door = Component::new(1, "door", ComponentType::Door, Extents::new(0.45, 1.8, 0.02), 0.9);
/// let budget = compose_budget(&[door], &BudgetConfiguration::default(), &PricingTables::builtin()).unwrap();
///
/// assert!((budget.summary.subtotal - 252.57).abs() < 1e-9);
/// assert!((budget.summary.final_total - 328.35).abs() < 1e-9);
/// ```
pub fn compose_budget(
    components: &[Component],
    config: &BudgetConfiguration,
    tables: &PricingTables,
) -> ComposeResult<BudgetResult> {
    config.validate()?;
    if components.is_empty() {
        return Err(BudgetError::NoComponents);
    }

    let rates = RateCard::resolve(config, tables)?;
    let costs: Vec<CostBreakdown> = components.iter().map(|c| rates.cost_of(c)).collect();
    let total: CostBreakdown = costs.iter().copied().sum();
    let total_area: f64 = components.iter().map(Component::area_m2).sum();

    let mut quantities: BTreeMap<AccessoryKind, u32> = BTreeMap::new();
    let component_costs = components
        .iter()
        .zip(&costs)
        .map(|(component, cost)| {
            let needs = accessory_needs(component.component_type());
            for &(kind, quantity) in &needs {
                *quantities.entry(kind).or_insert(0) += quantity;
            }
            debug!(
                id = component.id(),
                component_type = %component.component_type(),
                subtotal = cost.subtotal(),
                "Costed component"
            );
            ComponentCost {
                id: component.id(),
                name: component.name().to_string(),
                component_type: component.component_type(),
                area_m2: component.area_m2(),
                accessories: needs
                    .into_iter()
                    .map(|(kind, quantity)| accessory_label(kind, quantity))
                    .collect(),
                summary: BudgetSummary::new(cost, config.margin, component.area_m2()),
            }
        })
        .collect();

    let items = quantities
        .into_iter()
        .map(|(kind, quantity)| {
            let unit_price = rates.accessories.price(kind);
            AccessoryItem {
                kind,
                quantity,
                unit_price,
                total: round_money(f64::from(quantity) * unit_price),
            }
        })
        .collect();

    let material = rates.material;
    let budget = BudgetResult {
        materials: MaterialLine {
            material_id: rates.material_id.to_string(),
            description: material.description.clone(),
            supplier: material.supplier.clone(),
            net_area_m2: round_area(total_area),
            waste_fraction: material.waste_fraction,
            gross_area_m2: round_area(total_area * (1.0 + material.waste_fraction)),
            price_per_m2: material.price_per_m2,
            total: round_money(total.material),
        },
        accessories: AccessoryLines {
            tier: rates.accessory_tier.to_string(),
            items,
            total: round_money(total.accessories),
        },
        labor: LaborLine {
            complexity: rates.labor_complexity.to_string(),
            area_m2: round_area(total_area),
            rate_per_m2: round_money(rates.labor_rate_per_m2),
            total: round_money(total.labor),
        },
        cutting: CuttingLine {
            pieces: components.len(),
            total: round_money(total.cutting),
        },
        summary: BudgetSummary::new(&total, config.margin, total_area),
        components: component_costs,
        configuration: config.clone(),
        price_source: tables.source.clone(),
    };

    info!(
        components = components.len(),
        material = rates.material_id,
        area_m2 = budget.materials.net_area_m2,
        subtotal = budget.summary.subtotal,
        final_total = budget.summary.final_total,
        "Composed budget"
    );
    Ok(budget)
}

/// Compose a budget for the components of a successful analysis.
///
/// # Errors
///
/// Returns [`BudgetError::AnalysisFailed`] if the analysis did not succeed,
/// otherwise any error from [`compose_budget`].
pub fn compose_for_analysis(
    analysis: &AnalysisResult,
    config: &BudgetConfiguration,
    tables: &PricingTables,
) -> ComposeResult<BudgetResult> {
    if !analysis.success {
        return Err(BudgetError::AnalysisFailed {
            message: analysis
                .error_message()
                .unwrap_or("analysis did not succeed")
                .to_string(),
        });
    }
    compose_budget(&analysis.components, config, tables)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use furniture_parts::{ComponentType, Extents, FailureKind};
    use std::time::Duration;

    fn part(id: usize, component_type: ComponentType, w: f64, h: f64, d: f64) -> Component {
        Component::new(id, format!("part_{id}"), component_type, Extents::new(w, h, d), 0.8)
    }

    fn wardrobe() -> Vec<Component> {
        vec![
            part(1, ComponentType::TallCabinet, 1.0, 2.0, 0.6),
            part(2, ComponentType::Door, 0.45, 1.8, 0.02),
            part(3, ComponentType::Drawer, 0.9, 0.2, 0.5),
            part(4, ComponentType::Shelf, 0.9, 0.02, 0.5),
            part(5, ComponentType::Shelf, 0.9, 0.02, 0.5),
        ]
    }

    #[test]
    fn accessory_lines_aggregate_quantities() {
        let budget = compose_budget(&wardrobe(), &BudgetConfiguration::default(), &PricingTables::builtin());
        let Ok(budget) = budget else {
            panic!("budget failed");
        };

        let lines: Vec<_> = budget
            .accessories
            .items
            .iter()
            .map(|i| (i.kind, i.quantity))
            .collect();
        assert_eq!(
            lines,
            vec![
                (AccessoryKind::Hinge, 4),
                (AccessoryKind::Handle, 2),
                (AccessoryKind::Slide, 1),
                (AccessoryKind::ShelfSupport, 8),
            ]
        );
        let expected = 4.0 * 12.50 + 2.0 * 15.80 + 45.00 + 8.0 * 8.50;
        assert_relative_eq!(budget.accessories.total, expected, epsilon = 1e-9);

        assert_eq!(budget.components[2].accessories, ["2x Hinge", "1x Handle", "1x Slide pair"]);
        assert!(budget.components[0].accessories.is_empty());
        assert_eq!(budget.cutting.pieces, 5);
    }

    #[test]
    fn material_line_details() {
        let config = BudgetConfiguration::default().with_material("mdf_18mm");
        let budget = compose_budget(&wardrobe(), &config, &PricingTables::builtin());
        let Ok(budget) = budget else {
            panic!("budget failed");
        };

        assert_eq!(budget.materials.material_id, "mdf_18mm");
        assert_eq!(budget.materials.supplier, "Duratex");
        let area = 2.0 + 0.81 + 0.18 + 0.018 + 0.018;
        assert_relative_eq!(budget.materials.net_area_m2, area, epsilon = 1e-9);
        assert_relative_eq!(budget.materials.gross_area_m2, round_area(area * 1.15), epsilon = 1e-9);
        assert_relative_eq!(budget.materials.total, round_money(area * 1.15 * 77.85), epsilon = 1e-9);
        assert_eq!(budget.price_source.captured_on.to_string(), "2025-06-30");
    }

    #[test]
    fn margin_zero_final_equals_subtotal() {
        let config = BudgetConfiguration::default().with_margin(0.0);
        let budget = compose_budget(&wardrobe(), &config, &PricingTables::builtin());
        let Ok(budget) = budget else {
            panic!("budget failed");
        };
        assert_relative_eq!(budget.summary.final_total, budget.summary.subtotal);
        assert_relative_eq!(budget.summary.margin, 0.0);
    }

    #[test]
    fn rejects_bad_requests() {
        let tables = PricingTables::builtin();
        assert!(matches!(
            compose_budget(&[], &BudgetConfiguration::default(), &tables),
            Err(BudgetError::NoComponents)
        ));
        assert!(matches!(
            compose_budget(&wardrobe(), &BudgetConfiguration::default().with_margin(1.0), &tables),
            Err(BudgetError::InvalidMargin { .. })
        ));
    }

    #[test]
    fn failed_analysis_never_priced() {
        let analysis = AnalysisResult::failed(FailureKind::Load, "corrupt file", Duration::ZERO);
        let err = compose_for_analysis(&analysis, &BudgetConfiguration::default(), &PricingTables::builtin());
        assert!(matches!(err, Err(BudgetError::AnalysisFailed { ref message }) if message == "corrupt file"));
    }

    #[test]
    fn successful_analysis_priced() {
        let analysis = AnalysisResult::succeeded(wardrobe(), 0, Duration::ZERO);
        let budget = compose_for_analysis(&analysis, &BudgetConfiguration::default(), &PricingTables::builtin());
        assert_eq!(budget.map(|b| b.components.len()).ok(), Some(5));
    }

    #[test]
    fn zero_area_components_have_zero_rate() {
        // Sub-millimetre boards round to zero area
        let budget = compose_budget(
            &[part(1, ComponentType::Generic, 0.0004, 0.0004, 0.01)],
            &BudgetConfiguration::default(),
            &PricingTables::builtin(),
        );
        let Ok(budget) = budget else {
            panic!("budget failed");
        };
        assert_relative_eq!(budget.summary.rate_per_m2, 0.0);
        // Cutting minimum still applies
        assert_relative_eq!(budget.summary.cutting, 15.0);
    }
}
