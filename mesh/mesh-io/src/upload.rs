//! Upload validation and scoped loading.

use std::io::Write;
use std::path::Path;

use mesh_types::LoadedModel;
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};
use crate::{MeshFormat, load_model_as};

/// Limits applied to an upload before it is parsed.
///
/// # Example
///
/// ```
/// use mesh_io::UploadLimits;
///
/// let limits = UploadLimits::default();
/// assert_eq!(limits.max_bytes, 500 * 1024 * 1024);
///
/// let tight = UploadLimits::default().max_megabytes(50);
/// assert_eq!(tight.max_bytes, 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Largest accepted upload, in bytes.
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: 500 * 1024 * 1024,
        }
    }
}

impl UploadLimits {
    /// Set the size limit in megabytes (MiB).
    #[must_use]
    pub const fn max_megabytes(mut self, megabytes: u64) -> Self {
        self.max_bytes = megabytes * 1024 * 1024;
        self
    }
}

/// Check an upload's name and size without looking at its content.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] if the extension is not obj, dae, stl or ply
/// - [`IoError::FileTooLarge`] if `size` exceeds `limits.max_bytes`
///
/// # Example
///
/// ```
/// use mesh_io::{MeshFormat, UploadLimits, validate_upload};
///
/// let limits = UploadLimits::default();
/// assert_eq!(validate_upload("kitchen.dae", 1024, &limits).ok(), Some(MeshFormat::Dae));
/// assert!(validate_upload("kitchen.skp", 1024, &limits).is_err());
/// ```
pub fn validate_upload(filename: &str, size: u64, limits: &UploadLimits) -> IoResult<MeshFormat> {
    let Some(format) = MeshFormat::from_path(filename) else {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_lowercase();
        warn!(filename, extension, "Rejected upload with unsupported format");
        return Err(IoError::UnsupportedFormat {
            extension,
            accepted: MeshFormat::accepted_list(),
        });
    };

    if size > limits.max_bytes {
        warn!(filename, size, limit = limits.max_bytes, "Rejected oversized upload");
        return Err(IoError::FileTooLarge {
            size,
            limit: limits.max_bytes,
        });
    }

    Ok(format)
}

/// Something that can turn raw model bytes into geometry.
///
/// The analysis pipeline only talks to this trait, so hosts can plug in a
/// different mesh backend (or a canned one in tests).
pub trait MeshLoader {
    /// Parse `bytes` as `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed into geometry.
    fn load(&self, bytes: &[u8], format: MeshFormat) -> IoResult<LoadedModel>;
}

/// Loader that writes the bytes to a temporary file and reads it back with
/// the path-based format readers.
///
/// The temporary file is deleted when the load returns, whether it
/// succeeded or failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TempFileLoader;

impl MeshLoader for TempFileLoader {
    fn load(&self, bytes: &[u8], format: MeshFormat) -> IoResult<LoadedModel> {
        with_temp_file(bytes, format, |path| load_model_as(path, format))
    }
}

/// Write `bytes` to a temporary file named `*.{ext}` and run `f` on its path.
///
/// The file is unlinked when this returns, on success, error or panic unwind.
fn with_temp_file<T>(
    bytes: &[u8],
    format: MeshFormat,
    f: impl FnOnce(&Path) -> IoResult<T>,
) -> IoResult<T> {
    let suffix = format!(".{}", format.extension());
    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;

    debug!(path = %file.path().display(), bytes = bytes.len(), "Spilled upload to temporary file");

    f(file.path())
}

/// Validate an upload and load it with `loader`.
///
/// # Errors
///
/// Returns a validation error (see [`validate_upload`]) before the loader
/// is invoked, or whatever error the loader reports.
pub fn load_upload<L: MeshLoader + ?Sized>(
    bytes: &[u8],
    filename: &str,
    loader: &L,
    limits: &UploadLimits,
) -> IoResult<LoadedModel> {
    let format = validate_upload(filename, bytes.len() as u64, limits)?;
    loader.load(bytes, format)
}
