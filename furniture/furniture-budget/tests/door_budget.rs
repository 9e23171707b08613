//! Worked example: one door, default configuration.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use approx::assert_relative_eq;
use furniture_budget::{BudgetConfiguration, compose_budget};
use furniture_parts::{Component, ComponentType, Extents};
use furniture_pricing::{AccessoryKind, PricingTables};

#[test]
fn single_door_default_configuration() {
    let door = Component::new(1, "door", ComponentType::Door, Extents::new(0.45, 1.8, 0.02), 0.9);
    let config = BudgetConfiguration::default();
    let budget = compose_budget(&[door], &config, &PricingTables::builtin()).unwrap();

    assert_relative_eq!(budget.materials.net_area_m2, 0.81);
    assert_relative_eq!(budget.materials.gross_area_m2, 0.9315, epsilon = 0.001);
    assert_relative_eq!(budget.materials.total, 64.41);

    assert_eq!(budget.accessories.items.len(), 2);
    assert_eq!(budget.accessories.items[0].kind, AccessoryKind::Hinge);
    assert_eq!(budget.accessories.items[0].quantity, 2);
    assert_relative_eq!(budget.accessories.total, 40.80);

    assert_relative_eq!(budget.labor.rate_per_m2, 156.00);
    assert_relative_eq!(budget.labor.total, 126.36);

    // Perimeter 4.5 m -> 11.25, raised to the 15.00 minimum, plus 4 hinge bores
    assert_relative_eq!(budget.cutting.total, 21.00);

    let s = &budget.summary;
    assert_relative_eq!(s.subtotal, 252.57);
    assert_relative_eq!(s.margin, 75.77);
    // 252.573225 * 1.3 = 328.3451925. Adding the already rounded subtotal and
    // margin gives 328.34 instead; the total is rounded once, from unrounded sums.
    assert_relative_eq!(s.final_total, 328.35);
    assert_relative_eq!(s.subtotal + s.margin, 328.34, epsilon = 1e-9);
    assert_relative_eq!(s.rate_per_m2, 405.36);

    let only = &budget.components[0];
    assert_relative_eq!(only.summary.final_total, s.final_total);
    assert_eq!(only.accessories, ["2x Hinge", "1x Handle"]);
}
