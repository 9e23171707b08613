//! Reading and writing pricing tables as TOML or JSON.

use std::path::Path;

use tracing::info;

use crate::error::{PricingError, PricingResult};
use crate::tables::PricingTables;

impl PricingTables {
    /// Parse and validate tables from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or a value is out of range.
    pub fn from_toml_str(text: &str) -> PricingResult<Self> {
        parse_toml(text, "<string>")
    }

    /// Parse and validate tables from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or a value is out of range.
    pub fn from_json_str(text: &str) -> PricingResult<Self> {
        parse_json(text, "<string>")
    }

    /// Serialize to pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> PricingResult<String> {
        toml::to_string_pretty(self).map_err(|e| PricingError::Serialize(e.to_string()))
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PricingResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PricingError::Serialize(e.to_string()))
    }
}

fn parse_toml(text: &str, origin: &str) -> PricingResult<PricingTables> {
    let tables: PricingTables = toml::from_str(text).map_err(|e| PricingError::parse(origin, e))?;
    tables.validate()?;
    Ok(tables)
}

fn parse_json(text: &str, origin: &str) -> PricingResult<PricingTables> {
    let tables: PricingTables =
        serde_json::from_str(text).map_err(|e| PricingError::parse(origin, e))?;
    tables.validate()?;
    Ok(tables)
}

/// Load and validate tables from a `.toml` or `.json` file.
///
/// # Errors
///
/// Returns an error if the extension is not recognized, the file cannot be
/// read, does not parse, or fails validation.
pub fn load_pricing<P: AsRef<Path>>(path: P) -> PricingResult<PricingTables> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let parse = match extension.as_deref() {
        Some("toml") => parse_toml,
        Some("json") => parse_json,
        _ => {
            return Err(PricingError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let text = std::fs::read_to_string(path).map_err(|source| PricingError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tables = parse(&text, &path.display().to_string())?;

    info!(
        path = %path.display(),
        supplier = %tables.source.supplier,
        captured_on = %tables.source.captured_on,
        materials = tables.materials.len(),
        "Loaded pricing tables"
    );
    Ok(tables)
}
