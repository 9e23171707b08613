//! Upload-to-components analysis.

use std::path::Path;
use std::time::Instant;

use furniture_parts::{AnalysisResult, ExtractParams, FailureKind, extract_parts};
use mesh_io::{IoError, MeshLoader, TempFileLoader, UploadLimits, load_model, load_upload};
use mesh_types::LoadedModel;
use tracing::{info, warn};

/// Map a loader error to its failure stage.
fn io_failure_kind(err: &IoError) -> FailureKind {
    if err.is_validation() {
        FailureKind::Validation
    } else {
        FailureKind::Load
    }
}

/// Runs validation, loading and part identification for uploads.
///
/// Every outcome, including rejection and parse failure, is reported as an
/// [`AnalysisResult`]; nothing is thrown past the caller.
///
/// # Example
///
/// ```
/// use furniture::Analyzer;
/// use furniture_parts::FailureKind;
///
/// let analyzer = Analyzer::new();
/// let result = analyzer.analyze_upload(b"not a model", "model.fbx");
///
/// assert!(!result.success);
/// assert_eq!(result.failure_kind(), Some(FailureKind::Validation));
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer<L = TempFileLoader> {
    loader: L,
    limits: UploadLimits,
    params: ExtractParams,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Analyzer with the temp-file loader and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_loader(TempFileLoader)
    }
}

impl<L: MeshLoader> Analyzer<L> {
    /// Analyzer with a custom mesh loader.
    #[must_use]
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            limits: UploadLimits::default(),
            params: ExtractParams::default(),
        }
    }

    /// Set the upload limits.
    #[must_use]
    pub fn limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Upload limits in effect.
    #[must_use]
    pub const fn upload_limits(&self) -> UploadLimits {
        self.limits
    }

    /// Set the extraction parameters.
    #[must_use]
    pub fn params(mut self, params: ExtractParams) -> Self {
        self.params = params;
        self
    }

    /// Validate, load and decompose an uploaded file.
    #[must_use]
    pub fn analyze_upload(&self, bytes: &[u8], filename: &str) -> AnalysisResult {
        let started = Instant::now();
        match load_upload(bytes, filename, &self.loader, &self.limits) {
            Ok(model) => self.identify(&model, started),
            Err(err) => {
                let kind = io_failure_kind(&err);
                warn!(filename, %kind, error = %err, "Upload analysis failed");
                AnalysisResult::failed(kind, err.to_string(), started.elapsed())
            }
        }
    }

    /// Load and decompose a model file from disk.
    ///
    /// The upload size limit is not applied.
    #[must_use]
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> AnalysisResult {
        let started = Instant::now();
        match load_model(path.as_ref()) {
            Ok(model) => self.identify(&model, started),
            Err(err) => {
                let kind = io_failure_kind(&err);
                warn!(path = %path.as_ref().display(), %kind, error = %err, "Model analysis failed");
                AnalysisResult::failed(kind, err.to_string(), started.elapsed())
            }
        }
    }

    /// Decompose an already loaded model.
    #[must_use]
    pub fn analyze_model(&self, model: &LoadedModel) -> AnalysisResult {
        self.identify(model, Instant::now())
    }

    fn identify(&self, model: &LoadedModel, started: Instant) -> AnalysisResult {
        let extraction = extract_parts(model, &self.params);
        let dropped = extraction.dropped;

        match extraction.into_components() {
            Ok(components) => {
                let result = AnalysisResult::succeeded(components, dropped, started.elapsed());
                info!(
                    components = result.component_count,
                    dropped,
                    total_area_m2 = result.total_area_m2,
                    seconds = result.processing_time_s,
                    "Analysis complete"
                );
                result
            }
            Err(err) => {
                warn!(dropped, error = %err, "No components identified");
                let mut result =
                    AnalysisResult::failed(FailureKind::Geometry, err.to_string(), started.elapsed());
                result.dropped_geometries = dropped;
                result
            }
        }
    }
}
