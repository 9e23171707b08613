//! `furniture quote`: itemized budget for one model.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use furniture::prelude::*;
use furniture_budget::DEFAULT_MARGIN;
use furniture_pricing::{DEFAULT_ACCESSORY_TIER, DEFAULT_LABOR_COMPLEXITY, DEFAULT_MATERIAL};
use tracing::info;

use crate::analyze_file;

/// Options of `furniture quote`.
#[derive(Args)]
pub struct QuoteArgs {
    /// Model file (.obj, .dae, .stl, .ply)
    #[arg(name = "FILE")]
    file: PathBuf,

    /// Sheet material id
    #[arg(long, default_value = DEFAULT_MATERIAL)]
    material: String,

    /// Accessory tier
    #[arg(long, default_value = DEFAULT_ACCESSORY_TIER)]
    accessories: String,

    /// Labor complexity
    #[arg(long, default_value = DEFAULT_LABOR_COMPLEXITY)]
    complexity: String,

    /// Profit margin as a fraction in [0, 1)
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    margin: f64,

    /// Price tables (.toml or .json) instead of the built-in ones
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Do not synthesize parts for single-mesh models
    #[arg(long)]
    no_simulation: bool,

    /// Client name for the report
    #[arg(long, default_value = "")]
    client: String,

    /// Room name for the report
    #[arg(long, default_value = "")]
    room: String,

    /// Print the full project report as JSON
    #[arg(long)]
    json: bool,

    /// Write the project report as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Analyze and price the model named in `args`.
pub fn run(args: &QuoteArgs) -> Result<()> {
    let store = match &args.prices {
        Some(path) => PricingStore::new(
            load_pricing(path).with_context(|| format!("failed to load {}", path.display()))?,
        ),
        None => PricingStore::default(),
    };

    let mut params = ExtractParams::default();
    if args.no_simulation {
        params = params.without_simulation();
    }
    let estimator = Estimator::from_parts(Analyzer::new().params(params), Arc::new(store));

    let (analysis, _) = analyze_file(estimator.analyzer(), &args.file)?;
    let config = BudgetConfiguration::default()
        .with_material(args.material.as_str())
        .with_accessory_quality(args.accessories.as_str())
        .with_labor_complexity(args.complexity.as_str())
        .with_margin(args.margin);
    let budget = estimator.quote(&analysis, &config)?;

    let file = args.file.display().to_string();
    let report = ProjectReport::new(ProjectInfo::new(&args.client, &args.room, file), analysis, budget);

    if let Some(path) = &args.output {
        report.write_json(path)?;
        info!(path = %path.display(), "Wrote project report");
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
