//! Container extraction (import).
//!
//! Every entry name is validated before anything is written, so a container
//! with a single escaping entry leaves the target untouched.

use std::fs;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use crate::ClawError;
use crate::ImportConfig;
use crate::ImportReport;
use crate::Manifest;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::SafePath;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use crate::report::MISSING_MANIFEST_WARNING;

/// Extracts a container into `target`.
///
/// See [`import_archive_with_progress`].
///
/// # Errors
///
/// Returns `ClawError::MissingArchive` if `archive` is not a file.
///
/// # Examples
///
/// ```no_run
/// use claw_core::ImportConfig;
/// use claw_core::import_archive;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = import_archive(Path::new("archive.claw"), Path::new("restored"), &ImportConfig::default())?;
/// if let Some(manifest) = &report.manifest {
///     println!("{} context file(s)", manifest.file_count());
/// }
/// # Ok(())
/// # }
/// ```
pub fn import_archive(archive: &Path, target: &Path, config: &ImportConfig) -> Result<ImportReport> {
    import_archive_with_progress(archive, target, config, &mut NoopProgress)
}

/// Extracts a container into `target`, reporting per-entry progress.
///
/// The target directory is created (with parents) if absent. Existing files
/// are overwritten. After extraction the manifest is read back from the
/// target; a missing manifest is recorded as a warning, not an error.
///
/// # Errors
///
/// Returns `ClawError::MissingArchive` if `archive` is not a file,
/// `ClawError::PathTraversal` if any entry would escape `target`,
/// `ClawError::InvalidArchive` for a corrupt container, and
/// `ClawError::InvalidManifest` if the extracted manifest does not parse.
pub fn import_archive_with_progress(
    archive: &Path,
    target: &Path,
    config: &ImportConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ImportReport> {
    let start = Instant::now();

    if !archive.is_file() {
        return Err(ClawError::MissingArchive {
            path: archive.to_path_buf(),
        });
    }

    let mut zip = zip::ZipArchive::new(File::open(archive)?)?;

    let mut entries = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let entry = zip.by_index_raw(i)?;
        entries.push(SafePath::validate(entry.name())?);
    }

    fs::create_dir_all(target)?;

    let mut report = ImportReport::new();
    let mut buffer = CopyBuffer::new();
    let total = entries.len();

    for (i, safe) in entries.iter().enumerate() {
        let mut entry = zip.by_index(i)?;
        let out_path = safe.join_onto(target);
        progress.on_entry_start(safe.as_path(), total, i + 1);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&out_path)?;
            report.bytes_written += copy_with_progress(&mut entry, &mut out, &mut buffer, progress)?;
        }

        #[cfg(unix)]
        if config.preserve_permissions
            && let Some(mode) = entry.unix_mode()
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode & 0o777))?;
        }

        progress.on_entry_complete(safe.as_path());
    }
    progress.on_complete();

    #[cfg(not(unix))]
    let _ = config;

    report.archive_path = archive.to_path_buf();
    report.target_dir = target.to_path_buf();
    report.entries_extracted = total;
    report.manifest = Manifest::read_from(target)?;
    if report.manifest.is_none() {
        tracing::warn!(archive = %archive.display(), "{MISSING_MANIFEST_WARNING}");
        report.add_warning(MISSING_MANIFEST_WARNING);
    }
    report.duration = start.elapsed();

    Ok(report)
}
