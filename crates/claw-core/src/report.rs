//! Operation reports and progress callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::Manifest;

/// Warning text recorded when a container carries no manifest.
pub const MISSING_MANIFEST_WARNING: &str = "no manifest.json found in archive";

/// Report of an export operation.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Resolved container path that was written.
    pub output_path: PathBuf,

    /// Manifest bundled into the container.
    pub manifest: Manifest,

    /// Number of entries written to the container.
    pub entries_written: usize,

    /// Total uncompressed bytes written.
    pub bytes_written: u64,

    /// Size of the finished container on disk.
    pub bytes_compressed: u64,

    /// Duration of the export operation.
    pub duration: Duration,
}

impl ExportReport {
    /// Number of payload files under `context/`.
    #[must_use]
    pub fn context_file_count(&self) -> usize {
        self.manifest.file_count()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }
}

/// Report of an import operation.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Container that was extracted.
    pub archive_path: PathBuf,

    /// Directory the entries were extracted into.
    pub target_dir: PathBuf,

    /// Number of container entries processed.
    pub entries_extracted: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Manifest read back from the extracted tree, if present.
    pub manifest: Option<Manifest>,

    /// Duration of the import operation.
    pub duration: Duration,

    /// Non-fatal conditions encountered.
    pub warnings: Vec<String>,
}

impl ImportReport {
    /// Creates a new empty import report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether the extracted tree contained a manifest.
    #[must_use]
    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Callback trait for progress reporting during export and import.
///
/// # Examples
///
/// ```
/// use claw_core::ProgressCallback;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called before an entry is processed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after each chunk of entry data is written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once when the whole operation is finished.
    fn on_complete(&mut self);
}

/// Progress callback that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
