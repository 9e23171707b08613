//! Furniture cost estimation from the command line.
//!
//! # Commands
//!
//! - `furniture analyze <FILE>` - List the components found in a model
//! - `furniture quote <FILE>` - Itemized budget for a model
//! - `furniture prices` - Print the reference price tables
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `furniture=info,mesh_io=info`).

mod analyze;
mod prices;
mod quote;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use furniture::io::validate_upload;
use furniture::prelude::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Furniture fabrication cost estimation
#[derive(Parser)]
#[command(name = "furniture")]
#[command(about = "Estimate furniture fabrication costs from 3D models", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify and classify the components of a model
    Analyze {
        /// Model file (.obj, .dae, .stl, .ply)
        #[arg(name = "FILE")]
        file: PathBuf,

        /// Do not synthesize parts for single-mesh models
        #[arg(long)]
        no_simulation: bool,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute an itemized budget for a model
    Quote(quote::QuoteArgs),

    /// Print the price tables
    Prices {
        /// Price file to print instead of the built-in tables
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TableFormat::Toml)]
        format: TableFormat,
    },
}

/// Serialization format for price tables.
#[derive(Clone, Copy, ValueEnum)]
enum TableFormat {
    Toml,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "furniture=info,mesh_io=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            no_simulation,
            json,
        } => analyze::run(&file, no_simulation, json),
        Commands::Quote(args) => quote::run(&args),
        Commands::Prices { file, format } => prices::run(file.as_deref(), format),
    }
}

/// Read a model file and analyze it as an upload.
///
/// Going through the upload path applies the same extension and size checks
/// a browser upload gets. Both are checked against the file's metadata
/// before anything is read.
fn analyze_file(analyzer: &Analyzer, path: &Path) -> Result<(AnalysisResult, u64)> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("not a file name: {}", path.display()))?;
    let size = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    validate_upload(filename, size, &analyzer.upload_limits())?;

    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(filename, size = bytes.len(), "Read model file");

    let analysis = analyzer.analyze_upload(&bytes, filename);
    if let Some(failure) = &analysis.failure {
        bail!("{} error: {}", failure.kind, failure.message);
    }
    Ok((analysis, size))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 0.6 0 0\nv 0.6 0.72 0.018\nf 1 2 3\n";

    fn write_model(name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, TRIANGLE_OBJ).unwrap();
        (dir, path)
    }

    #[test]
    fn oversized_file_rejected_before_reading() {
        let (_dir, path) = write_model("panel.obj");
        let analyzer = Analyzer::new().limits(UploadLimits { max_bytes: 16 });

        let err = analyze_file(&analyzer, &path).unwrap_err();
        assert!(err.downcast_ref::<furniture::io::IoError>().is_some_and(furniture::io::IoError::is_validation));
    }

    #[test]
    fn unsupported_extension_rejected() {
        let (_dir, path) = write_model("panel.skp");
        assert!(analyze_file(&Analyzer::new(), &path).is_err());
    }

    #[test]
    fn accepted_file_reports_its_size() {
        let (_dir, path) = write_model("panel.obj");
        let (analysis, size) = analyze_file(&Analyzer::new(), &path).unwrap();
        assert!(analysis.success);
        assert_eq!(size, TRIANGLE_OBJ.len() as u64);
    }
}
