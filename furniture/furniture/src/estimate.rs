//! Analysis plus pricing against a shared snapshot store.

use std::sync::Arc;

use furniture_budget::{BudgetConfiguration, BudgetResult, ComposeResult, compose_for_analysis};
use furniture_parts::AnalysisResult;
use furniture_pricing::PricingStore;
use mesh_io::{MeshLoader, TempFileLoader};

use crate::analyze::Analyzer;

/// Price a successful analysis with the store's current snapshot.
///
/// # Errors
///
/// Returns [`BudgetError::AnalysisFailed`](furniture_budget::BudgetError::AnalysisFailed)
/// for a failed analysis, or any configuration or pricing error.
pub fn quote(
    analysis: &AnalysisResult,
    config: &BudgetConfiguration,
    pricing: &PricingStore,
) -> ComposeResult<BudgetResult> {
    let tables = pricing.snapshot();
    compose_for_analysis(analysis, config, &tables)
}

/// An [`Analyzer`] paired with a [`PricingStore`].
///
/// The store is shared, so a price update collaborator holding the same
/// `Arc` can swap snapshots while estimates run.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use furniture::{Analyzer, Estimator};
/// use furniture_budget::BudgetConfiguration;
/// use furniture_parts::ExtractParams;
/// use furniture_pricing::PricingStore;
///
/// // A lone door panel: measure it, do not synthesize parts around it
/// let analyzer = Analyzer::new().params(ExtractParams::default().without_simulation());
/// let estimator = Estimator::from_parts(analyzer, Arc::new(PricingStore::default()));
/// let obj = b"o door\nv 0 0 0\nv 450 1800 18\nv 450 0 0\nf 1 2 3\n";
///
/// let analysis = estimator.analyze_upload(obj, "door.obj");
/// let budget = estimator.quote(&analysis, &BudgetConfiguration::default()).unwrap();
/// assert!((budget.summary.final_total - 328.35).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Estimator<L = TempFileLoader> {
    analyzer: Analyzer<L>,
    pricing: Arc<PricingStore>,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator {
    /// Default analyzer with the built-in prices.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Analyzer::new(), Arc::new(PricingStore::default()))
    }
}

impl<L: MeshLoader> Estimator<L> {
    /// Combine an analyzer with a shared pricing store.
    #[must_use]
    pub const fn from_parts(analyzer: Analyzer<L>, pricing: Arc<PricingStore>) -> Self {
        Self { analyzer, pricing }
    }

    /// The analyzer.
    #[must_use]
    pub const fn analyzer(&self) -> &Analyzer<L> {
        &self.analyzer
    }

    /// The shared pricing store.
    #[must_use]
    pub const fn pricing(&self) -> &Arc<PricingStore> {
        &self.pricing
    }

    /// See [`Analyzer::analyze_upload`].
    #[must_use]
    pub fn analyze_upload(&self, bytes: &[u8], filename: &str) -> AnalysisResult {
        self.analyzer.analyze_upload(bytes, filename)
    }

    /// Price an analysis with the current snapshot.
    ///
    /// # Errors
    ///
    /// See [`quote`].
    pub fn quote(&self, analysis: &AnalysisResult, config: &BudgetConfiguration) -> ComposeResult<BudgetResult> {
        quote(analysis, config, &self.pricing)
    }
}
