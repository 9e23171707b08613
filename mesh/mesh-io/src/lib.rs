//! Upload validation and mesh loading for furniture models.
//!
//! This crate turns an uploaded file into geometry the part extractor can
//! work with. It accepts four formats:
//!
//! - **OBJ** (Wavefront) - `o`/`g` groups become named scene objects
//! - **DAE** (COLLADA) - each `<geometry>` becomes a named scene object
//! - **STL** (Stereolithography) - Binary and ASCII, always a single mesh
//! - **PLY** (Polygon File Format) - Binary and ASCII, always a single mesh
//!
//! # Uploads
//!
//! Uploads arrive as bytes plus a file name. [`validate_upload`] checks the
//! extension and size before anything is parsed, and [`load_upload`] hands
//! the bytes to a [`MeshLoader`]. The default [`TempFileLoader`] spills the
//! bytes to a temporary file that is removed on every exit path, because the
//! format readers here work on paths.
//!
//! ```no_run
//! use mesh_io::{TempFileLoader, UploadLimits, load_upload};
//!
//! let bytes = std::fs::read("wardrobe.obj").unwrap();
//! let model = load_upload(&bytes, "wardrobe.obj", &TempFileLoader, &UploadLimits::default()).unwrap();
//! println!("{} objects", model.object_count());
//! ```
//!
//! # Loading from disk
//!
//! ```no_run
//! use mesh_io::load_model;
//!
//! // Format detected from the .stl extension
//! let model = load_model("countertop.stl").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod dae;
mod error;
mod obj;
mod ply;
mod stl;
mod upload;

pub use dae::load_dae;
pub use error::{IoError, IoResult};
pub use obj::load_obj;
pub use ply::load_ply;
pub use stl::load_stl;
pub use upload::{MeshLoader, TempFileLoader, UploadLimits, load_upload, validate_upload};

use std::fs::File;
use std::path::Path;

use mesh_types::LoadedModel;
use tracing::debug;

/// Accepted model file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// OBJ (Wavefront). ASCII, may contain several named objects.
    Obj,
    /// COLLADA. XML, may contain several named geometries.
    Dae,
    /// STL (Stereolithography). Binary or ASCII, single mesh.
    Stl,
    /// PLY (Polygon File Format). Binary or ASCII, single mesh.
    Ply,
}

impl MeshFormat {
    /// Every accepted format, in the order they are listed to users.
    pub const ALL: [Self; 4] = [Self::Obj, Self::Dae, Self::Stl, Self::Ply];

    /// Detect format from a file name or path.
    ///
    /// Returns `None` if the extension is missing or not accepted.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Detect format from a bare extension, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Self::Obj),
            "dae" => Some(Self::Dae),
            "stl" => Some(Self::Stl),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Dae => "dae",
            Self::Stl => "stl",
            Self::Ply => "ply",
        }
    }

    /// Accepted extensions as a human-readable list.
    #[must_use]
    pub fn accepted_list() -> String {
        Self::ALL
            .iter()
            .map(Self::extension)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Load a model from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not an accepted format
/// - The file cannot be read
/// - The file content is invalid or has no vertices
pub fn load_model<P: AsRef<Path>>(path: P) -> IoResult<LoadedModel> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_lowercase(),
        accepted: MeshFormat::accepted_list(),
    })?;
    load_model_as(path, format)
}

/// Load a model from a file with an explicit format.
///
/// One-object scenes are collapsed to a plain mesh.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse as `format`,
/// or contains no vertices.
pub fn load_model_as<P: AsRef<Path>>(path: P, format: MeshFormat) -> IoResult<LoadedModel> {
    let path = path.as_ref();
    let model = match format {
        MeshFormat::Obj => load_obj(path)?,
        MeshFormat::Dae => load_dae(path)?,
        MeshFormat::Stl => LoadedModel::Mesh(load_stl(path)?),
        MeshFormat::Ply => LoadedModel::Mesh(load_ply(path)?),
    }
    .simplify();

    if model.is_empty() {
        return Err(IoError::EmptyGeometry);
    }

    debug!(
        format = format.extension(),
        objects = model.object_count(),
        "Loaded model"
    );
    Ok(model)
}

/// Open a model file, mapping a missing file to [`IoError::FileNotFound`].
pub(crate) fn open_file(path: &Path) -> IoResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })
}
