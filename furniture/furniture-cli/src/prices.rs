//! `furniture prices`: dump the price tables.

use std::path::Path;

use anyhow::{Context, Result};
use furniture::prelude::*;

use crate::TableFormat;

/// Print the built-in tables, or the validated contents of `file`.
pub fn run(file: Option<&Path>, format: TableFormat) -> Result<()> {
    let tables = match file {
        Some(path) => load_pricing(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => PricingTables::builtin(),
    };

    let text = match format {
        TableFormat::Toml => tables.to_toml()?,
        TableFormat::Json => tables.to_json()?,
    };
    println!("{text}");
    Ok(())
}
