//! Result types for one model analysis.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentType, round_to};

/// Which stage an analysis failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Upload rejected before parsing (extension or size).
    Validation,
    /// Content could not be parsed into geometry.
    Load,
    /// Geometry parsed but no plausible component survived.
    Geometry,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validation => "validation",
            Self::Load => "load",
            Self::Geometry => "geometry",
        })
    }
}

/// Why an analysis failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    /// Failing stage.
    pub kind: FailureKind,
    /// Diagnostic for the user.
    pub message: String,
}

/// Outcome of analysing one uploaded model.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use furniture_parts::{AnalysisResult, FailureKind};
///
/// let failed = AnalysisResult::failed(FailureKind::Validation, "unsupported format", Duration::ZERO);
/// assert!(!failed.success);
/// assert_eq!(failed.error_message(), Some("unsupported format"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whether components were identified.
    pub success: bool,
    /// Identified components, numbered from 1.
    pub components: Vec<Component>,
    /// Number of components.
    pub component_count: usize,
    /// Sum of component areas in square metres.
    pub total_area_m2: f64,
    /// Sum of component volumes in cubic metres.
    pub total_volume_m3: f64,
    /// Geometries dropped by the plausibility filter.
    pub dropped_geometries: usize,
    /// Wall-clock time spent, in seconds.
    pub processing_time_s: f64,
    /// Set when `success` is false.
    pub failure: Option<AnalysisFailure>,
}

impl AnalysisResult {
    /// A successful analysis.
    #[must_use]
    pub fn succeeded(components: Vec<Component>, dropped_geometries: usize, elapsed: Duration) -> Self {
        let total_area_m2 = round_to(components.iter().map(Component::area_m2).sum(), 3);
        let total_volume_m3 = round_to(components.iter().map(Component::volume_m3).sum(), 4);
        Self {
            success: true,
            component_count: components.len(),
            components,
            total_area_m2,
            total_volume_m3,
            dropped_geometries,
            processing_time_s: round_to(elapsed.as_secs_f64(), 3),
            failure: None,
        }
    }

    /// A failed analysis with no components.
    #[must_use]
    pub fn failed(kind: FailureKind, message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            success: false,
            components: Vec::new(),
            component_count: 0,
            total_area_m2: 0.0,
            total_volume_m3: 0.0,
            dropped_geometries: 0,
            processing_time_s: round_to(elapsed.as_secs_f64(), 3),
            failure: Some(AnalysisFailure {
                kind,
                message: message.into(),
            }),
        }
    }

    /// Failure diagnostic, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    /// Failing stage, if any.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }

    /// Number of components per type, in type order.
    #[must_use]
    pub fn type_counts(&self) -> BTreeMap<ComponentType, usize> {
        let mut counts = BTreeMap::new();
        for component in &self.components {
            *counts.entry(component.component_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Mean confidence over all components, 0 when there are none.
    #[must_use]
    pub fn mean_confidence(&self) -> f64 {
        if self.components.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.components.len() as f64;
        self.components.iter().map(Component::confidence).sum::<f64>() / count
    }
}
