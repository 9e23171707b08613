//! Property-based tests for budget composition.
//!
//! Run with: cargo test -p furniture-budget -- proptest

use furniture_budget::{BudgetConfiguration, CostBreakdown, RateCard, compose_budget};
use furniture_parts::{Component, ComponentType, Extents};
use furniture_pricing::PricingTables;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_component() -> impl Strategy<Value = Component> {
    (
        prop::sample::select(ComponentType::ALL.to_vec()),
        0.01..5.0f64,
        0.01..4.0f64,
        0.01..2.0f64,
    )
        .prop_map(|(t, w, h, d)| Component::new(1, "part", t, Extents::new(w, h, d), 0.7))
}

fn arb_config() -> impl Strategy<Value = BudgetConfiguration> {
    (
        prop::sample::select(vec!["mdf_15mm", "mdf_18mm", "plywood_10mm", "melamine_15mm", "unknown"]),
        prop::sample::select(vec!["common", "premium", "unknown"]),
        prop::sample::select(vec!["simple", "medium", "complex", "premium", "unknown"]),
        0.0..0.99f64,
    )
        .prop_map(|(material, tier, complexity, margin)| {
            BudgetConfiguration::default()
                .with_material(material)
                .with_accessory_quality(tier)
                .with_labor_complexity(complexity)
                .with_margin(margin)
        })
}

// =============================================================================
// Additivity and margin
// =============================================================================

proptest! {
    /// Per-component subtotals add up to the project subtotal.
    #[test]
    fn component_subtotals_add_up(
        components in prop::collection::vec(arb_component(), 1..20),
        config in arb_config(),
    ) {
        let tables = PricingTables::builtin();
        let budget = compose_budget(&components, &config, &tables);
        prop_assert!(budget.is_ok());
        let Ok(budget) = budget else { return Ok(()) };

        // Unrounded: exact up to float noise
        let rates = RateCard::resolve(&config, &tables);
        prop_assert!(rates.is_ok());
        let Ok(rates) = rates else { return Ok(()) };
        let summed: f64 = components.iter().map(|c| rates.cost_of(c).subtotal()).sum();
        let total: CostBreakdown = components.iter().map(|c| rates.cost_of(c)).sum();
        prop_assert!((summed - total.subtotal()).abs() < 1e-6);

        // Rounded output: each component contributes at most half a cent
        #[allow(clippy::cast_precision_loss)]
        let tolerance = 0.01 + 0.005 * components.len() as f64;
        let per_component: f64 = budget.components.iter().map(|c| c.summary.subtotal).sum();
        prop_assert!(
            (per_component - budget.summary.subtotal).abs() <= tolerance,
            "{} vs {}",
            per_component,
            budget.summary.subtotal
        );
    }

    /// final = subtotal × (1 + margin), and the categories make up the subtotal.
    #[test]
    fn final_is_subtotal_plus_margin(
        components in prop::collection::vec(arb_component(), 1..10),
        config in arb_config(),
    ) {
        let budget = compose_budget(&components, &config, &PricingTables::builtin());
        let Ok(budget) = budget else {
            return Err(TestCaseError::fail("composition failed"));
        };
        let s = &budget.summary;

        prop_assert!((s.final_total - s.subtotal * (1.0 + config.margin)).abs() <= 0.02);
        prop_assert!((s.materials + s.accessories + s.labor + s.cutting - s.subtotal).abs() <= 0.03);
        prop_assert!(s.final_total >= s.subtotal);
        prop_assert!(s.rate_per_m2 >= 0.0);
    }

    /// Every piece pays at least the minimum cutting charge.
    #[test]
    fn cutting_minimum_per_piece(components in prop::collection::vec(arb_component(), 1..10)) {
        let tables = PricingTables::builtin();
        let budget = compose_budget(&components, &BudgetConfiguration::default(), &tables);
        let Ok(budget) = budget else {
            return Err(TestCaseError::fail("composition failed"));
        };
        for cost in &budget.components {
            prop_assert!(cost.summary.cutting >= tables.cutting.minimum_per_piece);
        }
    }
}
