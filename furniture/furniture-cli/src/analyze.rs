//! `furniture analyze`: component listing for one model.

use std::path::Path;

use anyhow::Result;
use furniture::prelude::*;

use crate::analyze_file;

/// Analyze `path` and print its components.
pub fn run(path: &Path, no_simulation: bool, json: bool) -> Result<()> {
    let mut params = ExtractParams::default();
    if no_simulation {
        params = params.without_simulation();
    }
    let analyzer = Analyzer::new().params(params);
    let (analysis, size) = analyze_file(&analyzer, path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{} ({})", path.display(), format_size(size));
    println!(
        "{} components, {} dropped, {:.3} m², {:.3}s",
        analysis.component_count,
        analysis.dropped_geometries,
        analysis.total_area_m2,
        analysis.processing_time_s
    );
    println!();
    println!(
        "{:>4}  {:<24} {:<14} {:>7} {:>7} {:>7} {:>7}  {:>5}",
        "id", "name", "type", "w (m)", "h (m)", "d (m)", "m²", "conf"
    );
    for c in &analysis.components {
        println!(
            "{:>4}  {:<24} {:<14} {:>7.3} {:>7.3} {:>7.3} {:>7.3}  {:>5.2}",
            c.id(),
            c.name(),
            c.component_type().display_name(),
            c.width_m(),
            c.height_m(),
            c.depth_m(),
            c.area_m2(),
            c.confidence()
        );
    }

    println!();
    for (component_type, count) in analysis.type_counts() {
        println!("  {count:>3} x {component_type}");
    }
    Ok(())
}
