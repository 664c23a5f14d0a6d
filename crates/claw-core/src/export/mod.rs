//! Archive building (export).
//!
//! Export assembles a staging tree from a source directory, regenerates the
//! manifest and bundled documents, copies in the tool, and compresses the
//! result into a `.claw` container.
//!
//! # Examples
//!
//! ```no_run
//! use claw_core::ExportConfig;
//! use claw_core::export_archive;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = export_archive(Path::new("work"), Some(Path::new("archive")), &ExportConfig::default())?;
//! assert!(report.output_path.ends_with("archive.claw"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod staging;
pub mod writer;

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

pub use builder::Exporter;
pub use staging::PayloadMode;
pub use staging::StagingTree;

use crate::ClawError;
use crate::ExportConfig;
use crate::ExportReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::layout;

/// Name used for the container when the source has no final component.
const FALLBACK_STEM: &str = "archive";

/// Builds a container from `source`.
///
/// See [`export_archive_with_progress`].
///
/// # Errors
///
/// Returns `ClawError::MissingSource` if `source` is not a directory, and
/// any I/O or zip error raised while staging or writing.
pub fn export_archive(
    source: &Path,
    output: Option<&Path>,
    config: &ExportConfig,
) -> Result<ExportReport> {
    export_archive_with_progress(source, output, config, &mut NoopProgress)
}

/// Builds a container from `source`, reporting per-entry progress.
///
/// The output path is resolved with [`resolve_output_path`]. The source
/// directory is never modified; all assembly happens in a temporary
/// staging tree that is removed on every exit path.
///
/// # Errors
///
/// Returns `ClawError::MissingSource` if `source` is not a directory (no side
/// effects in that case), `ClawError::InvalidConfiguration` for an invalid
/// config, and any I/O or zip error raised while staging or writing.
pub fn export_archive_with_progress(
    source: &Path,
    output: Option<&Path>,
    config: &ExportConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExportReport> {
    let start = Instant::now();
    config.validate()?;

    if !source.is_dir() {
        return Err(ClawError::MissingSource {
            path: source.to_path_buf(),
        });
    }

    let output_path = resolve_output_path(source, output)?;
    let source = fs::canonicalize(source)?;
    let tool = config.resolve_tool_path()?;
    let existing_output = fs::canonicalize(&output_path).ok();

    let staging = StagingTree::new()?;
    let mode = staging.stage_payload(&source, existing_output.as_deref())?;
    let manifest = staging.write_metadata()?;
    staging.copy_tool(&tool)?;
    tracing::debug!(?mode, files = manifest.file_count(), "staging complete");

    let stats = writer::write_container(staging.root(), &output_path, config, progress)?;
    let bytes_compressed = fs::metadata(&output_path)?.len();

    Ok(ExportReport {
        output_path,
        manifest,
        entries_written: stats.entries,
        bytes_written: stats.bytes,
        bytes_compressed,
        duration: start.elapsed(),
    })
}

/// Resolves where the container for `source` is written.
///
/// Without an explicit `output`, the container is `<source-name>.claw` in the
/// current directory. The source name is taken as typed, so a symlinked
/// source keeps the link's name. The result is absolute, has no trailing
/// separator and always ends in `.claw`: `out`, `out/` and `out.claw` all
/// resolve to `out.claw`.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
///
/// # Examples
///
/// ```
/// use claw_core::export::resolve_output_path;
/// use std::path::Path;
///
/// let path = resolve_output_path(Path::new("/data/work"), Some(Path::new("/tmp/out")))?;
/// assert_eq!(path, Path::new("/tmp/out.claw"));
///
/// let path = resolve_output_path(Path::new("/data/work"), None)?;
/// assert!(path.ends_with("work.claw"));
/// # Ok::<(), claw_core::ClawError>(())
/// ```
pub fn resolve_output_path(source: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let requested = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = absolute_lexical(source)?
                .file_name()
                .map_or_else(|| FALLBACK_STEM.into(), ToOwned::to_owned);
            PathBuf::from(stem)
        }
    };

    let mut resolved = absolute_lexical(&requested)?;
    if !layout::has_container_extension(&resolved) {
        let mut name = resolved.into_os_string();
        name.push(".");
        name.push(layout::EXTENSION);
        resolved = PathBuf::from(name);
    }

    Ok(resolved)
}

/// Makes `path` absolute and folds `.`, `..` and trailing separators
/// without touching the filesystem. Symlinks are left unresolved.
fn absolute_lexical(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
