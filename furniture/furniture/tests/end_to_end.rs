//! Upload-to-budget tests through the public pipeline.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use approx::assert_relative_eq;
use furniture::prelude::*;
use furniture_budget::BudgetError;

/// An axis-aligned box as OBJ vertices and faces, starting at `offset` (1-based).
fn obj_box(name: &str, offset: usize, min: [f64; 3], size: [f64; 3]) -> String {
    let [x, y, z] = min;
    let [w, h, d] = size;
    let mut out = format!("o {name}\n");
    for (dx, dy, dz) in [
        (0.0, 0.0, 0.0),
        (w, 0.0, 0.0),
        (w, h, 0.0),
        (0.0, h, 0.0),
        (0.0, 0.0, d),
        (w, 0.0, d),
        (w, h, d),
        (0.0, h, d),
    ] {
        out.push_str(&format!("v {} {} {}\n", x + dx, y + dy, z + dz));
    }
    let o = offset;
    for face in [[0, 1, 2, 3], [4, 5, 6, 7], [0, 1, 5, 4], [3, 2, 6, 7], [0, 3, 7, 4], [1, 2, 6, 5]] {
        out.push_str(&format!(
            "f {} {} {} {}\n",
            o + face[0],
            o + face[1],
            o + face[2],
            o + face[3]
        ));
    }
    out
}

/// Wardrobe in millimetres: carcass, named door, anonymous shelf, drawer, a
/// stray 1 mm sliver and an oversized floor plane.
fn wardrobe_obj() -> String {
    [
        obj_box("carcass", 1, [0.0, 0.0, 0.0], [1000.0, 2000.0, 600.0]),
        obj_box("Porta_Esquerda", 9, [0.0, 0.0, 600.0], [450.0, 1800.0, 18.0]),
        obj_box("object_3", 17, [20.0, 800.0, 20.0], [900.0, 18.0, 350.0]),
        obj_box("gaveta", 25, [20.0, 100.0, 20.0], [900.0, 200.0, 500.0]),
        obj_box("sliver", 33, [0.0, 0.0, 0.0], [500.0, 500.0, 1.0]),
        obj_box("floor", 41, [-3000.0, -10.0, -3000.0], [6000.0, 10.0, 6000.0]),
    ]
    .concat()
}

#[test]
fn wardrobe_scene_to_report() {
    let estimator = Estimator::new();
    let obj = wardrobe_obj();

    let analysis = estimator.analyze_upload(obj.as_bytes(), "wardrobe.obj");
    assert!(analysis.success, "{:?}", analysis.failure);
    assert_eq!(analysis.component_count, 4);
    assert_eq!(analysis.dropped_geometries, 2);

    let types: Vec<_> = analysis.components.iter().map(Component::component_type).collect();
    assert_eq!(
        types,
        [
            ComponentType::TallCabinet,
            ComponentType::Door,
            ComponentType::Shelf,
            ComponentType::Drawer,
        ]
    );
    // Name match on the door, dimension rule on the shelf
    assert_relative_eq!(analysis.components[1].confidence(), 0.9);
    assert_relative_eq!(analysis.components[2].confidence(), 0.7);
    assert_relative_eq!(analysis.total_area_m2, 2.0 + 0.81 + 0.016 + 0.18, epsilon = 1e-9);

    let budget = estimator.quote(&analysis, &BudgetConfiguration::default()).unwrap();
    let per_component: f64 = budget.components.iter().map(|c| c.summary.subtotal).sum();
    assert!((per_component - budget.summary.subtotal).abs() <= 0.03);

    let report = ProjectReport::new(ProjectInfo::new("Ana", "Bedroom", "wardrobe.obj"), analysis, budget);
    let json = report.to_json().unwrap();
    assert!(json.contains("\"tall_cabinet\""));
    assert!(report.render_text().contains("Accessories (common)"));
}

#[test]
fn single_mesh_gets_synthetic_parts() {
    let stl = {
        let mut out = String::from("solid wardrobe\n");
        for tri in [
            [[0.0, 0.0, 0.0], [1.2, 0.0, 0.0], [1.2, 2.2, 0.6]],
            [[0.0, 0.0, 0.0], [0.0, 2.2, 0.6], [1.2, 2.2, 0.6]],
        ] {
            out.push_str("facet normal 0 0 0\nouter loop\n");
            for [x, y, z] in tri {
                out.push_str(&format!("vertex {x} {y} {z}\n"));
            }
            out.push_str("endloop\nendfacet\n");
        }
        out.push_str("endsolid wardrobe\n");
        out
    };

    let analysis = Estimator::new().analyze_upload(stl.as_bytes(), "wardrobe.stl");
    assert!(analysis.success);
    // main structure, one door, floor(2.2 / 0.4) = 5 shelves
    assert_eq!(analysis.component_count, 7);
    let counts = analysis.type_counts();
    assert_eq!(counts.get(&ComponentType::Shelf), Some(&5));
    assert_eq!(counts.get(&ComponentType::Door), Some(&1));
    assert_eq!(analysis.components[0].name(), "main_structure");
}

#[test]
fn door_example_matches_worked_figures() {
    let analyzer = Analyzer::new().params(ExtractParams::default().without_simulation());
    let estimator = Estimator::from_parts(analyzer, Arc::new(PricingStore::default()));
    let obj = obj_box("door", 1, [0.0, 0.0, 0.0], [450.0, 1800.0, 20.0]);

    let analysis = estimator.analyze_upload(obj.as_bytes(), "door.obj");
    assert_eq!(analysis.component_count, 1);
    assert_eq!(analysis.components[0].component_type(), ComponentType::Door);
    assert_relative_eq!(analysis.components[0].area_m2(), 0.81);

    let budget = estimator.quote(&analysis, &BudgetConfiguration::default()).unwrap();
    let s = &budget.summary;
    assert_relative_eq!(s.materials, 64.41);
    assert_relative_eq!(s.accessories, 40.80);
    assert_relative_eq!(s.labor, 126.36);
    assert_relative_eq!(s.cutting, 21.00);
    assert_relative_eq!(s.subtotal, 252.57);
    assert_relative_eq!(s.margin, 75.77);
    assert_relative_eq!(s.final_total, 328.35);
    assert_eq!(format_currency(s.final_total), "R$ 328,35");
}

#[test]
fn rejected_uploads_never_reach_pricing() {
    let estimator = Estimator::new();
    let config = BudgetConfiguration::default();

    let wrong_type = estimator.analyze_upload(b"solid x\nendsolid x\n", "model.skp");
    assert_eq!(wrong_type.failure_kind(), Some(FailureKind::Validation));

    let corrupt = estimator.analyze_upload(b"v 1 2\nf 1 2 3\n", "broken.obj");
    assert_eq!(corrupt.failure_kind(), Some(FailureKind::Load));

    let implausible = estimator.analyze_upload(obj_box("floor", 1, [0.0; 3], [9.0, 0.01, 9.0]).as_bytes(), "floor.obj");
    assert_eq!(implausible.failure_kind(), Some(FailureKind::Geometry));

    for analysis in [&wrong_type, &corrupt, &implausible] {
        assert!(matches!(
            estimator.quote(analysis, &config),
            Err(BudgetError::AnalysisFailed { .. })
        ));
    }
}

#[test]
fn custom_pricing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.json");
    let mut tables = PricingTables::builtin();
    tables.cutting.minimum_per_piece = 0.0;
    std::fs::write(&path, tables.to_json().unwrap()).unwrap();

    let estimator = Estimator::new();
    estimator.pricing().reload_from(&path).unwrap();

    let analysis = estimator.analyze_upload(wardrobe_obj().as_bytes(), "wardrobe.obj");
    let budget = estimator.quote(&analysis, &BudgetConfiguration::default()).unwrap();
    // Door: perimeter 4.5 m -> 11.25 without the minimum, plus 6.00 bores
    assert_relative_eq!(budget.components[1].summary.cutting, 17.25);
}

#[test]
fn vertices_before_groups_price_only_the_groups() {
    let obj = "v 0 0 0\nv 450 0 0\nv 450 1800 20\nv 0 0 0\nv 900 0 0\nv 900 18 350\n\
               g door\nf 1 2 3\ng shelf\nf 6 4 5\n";
    let analysis = Estimator::new().analyze_upload(obj.as_bytes(), "cab.obj");

    assert!(analysis.success);
    let parts: Vec<_> = analysis
        .components
        .iter()
        .map(|c| (c.name(), c.component_type()))
        .collect();
    assert_eq!(parts, [("door", ComponentType::Door), ("shelf", ComponentType::Shelf)]);
}
