//! Project report export.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use furniture_budget::BudgetResult;
use furniture_parts::AnalysisResult;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FurnitureError, FurnitureResult};
use crate::format::format_currency;

/// Who and what a report is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Client name.
    pub client: String,
    /// Room the furniture is for, e.g. "Kitchen".
    pub room: String,
    /// Uploaded file name.
    pub file: String,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
}

impl ProjectInfo {
    /// Project details stamped with the current time.
    #[must_use]
    pub fn new(client: impl Into<String>, room: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            room: room.into(),
            file: file.into(),
            created_at: Utc::now(),
        }
    }
}

/// Analysis and budget for one project, exportable as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Project details.
    pub project: ProjectInfo,
    /// Component analysis.
    pub analysis: AnalysisResult,
    /// Itemized budget.
    pub budget: BudgetResult,
}

impl ProjectReport {
    /// Bundle an analysis and its budget.
    #[must_use]
    pub const fn new(project: ProjectInfo, analysis: AnalysisResult, budget: BudgetResult) -> Self {
        Self {
            project,
            analysis,
            budget,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> FurnitureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> FurnitureResult<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| FurnitureError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Wrote project report");
        Ok(())
    }

    /// Plain-text budget summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        let b = &self.budget;
        let s = &b.summary;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Client: {}  Room: {}  File: {}  Date: {}",
            self.project.client,
            self.project.room,
            self.project.file,
            self.project.created_at.format("%Y-%m-%d")
        );
        let _ = writeln!(
            out,
            "Components: {}  Area: {:.3} m²",
            self.analysis.component_count, b.materials.net_area_m2
        );
        let _ = writeln!(
            out,
            "Material: {} ({}) {:.3} m² x {}/m²  {}",
            b.materials.description,
            b.materials.material_id,
            b.materials.gross_area_m2,
            format_currency(b.materials.price_per_m2),
            format_currency(s.materials)
        );
        for item in &b.accessories.items {
            let _ = writeln!(
                out,
                "  {}x {} @ {}  {}",
                item.quantity,
                item.kind,
                format_currency(item.unit_price),
                format_currency(item.total)
            );
        }
        let _ = writeln!(out, "Accessories ({}): {}", b.accessories.tier, format_currency(s.accessories));
        let _ = writeln!(
            out,
            "Labor ({}): {} m² x {}/m²  {}",
            b.labor.complexity,
            b.labor.area_m2,
            format_currency(b.labor.rate_per_m2),
            format_currency(s.labor)
        );
        let _ = writeln!(out, "Cutting ({} pieces): {}", b.cutting.pieces, format_currency(s.cutting));
        let _ = writeln!(out, "Subtotal: {}", format_currency(s.subtotal));
        let _ = writeln!(
            out,
            "Margin ({:.0}%): {}",
            s.margin_fraction * 100.0,
            format_currency(s.margin)
        );
        let _ = writeln!(out, "Total: {}  ({}/m²)", format_currency(s.final_total), format_currency(s.rate_per_m2));
        let _ = write!(
            out,
            "Prices: {} ({}), captured {}",
            b.price_source.supplier, b.price_source.url, b.price_source.captured_on
        );
        out
    }
}
