//! Read-only container inspection.

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use crate::ClawError;
use crate::Manifest;
use crate::Result;
use crate::layout;
use crate::report::MISSING_MANIFEST_WARNING;

/// One entry of a container listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name as stored in the container.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Summary of a container, produced without extracting it.
#[derive(Debug, Clone, Default)]
pub struct ArchiveInfo {
    /// Container that was inspected.
    pub archive_path: PathBuf,
    /// Every entry, sorted by name.
    pub entries: Vec<ArchiveEntry>,
    /// Parsed manifest, if the container has one.
    pub manifest: Option<Manifest>,
    /// Non-fatal conditions encountered.
    pub warnings: Vec<String>,
}

impl ArchiveInfo {
    /// Total number of entries in the container.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Sum of uncompressed entry sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Summarises a container without writing anything to disk.
///
/// The manifest is parsed straight from the container entry.
///
/// # Errors
///
/// Returns `ClawError::MissingArchive` if `path` is not a file,
/// `ClawError::InvalidArchive` for a corrupt container, and
/// `ClawError::InvalidManifest` if the manifest entry does not parse.
///
/// # Examples
///
/// ```no_run
/// use claw_core::inspect_archive;
/// use std::path::Path;
///
/// let info = inspect_archive(Path::new("archive.claw"))?;
/// for entry in &info.entries {
///     println!("{}  ({} bytes)", entry.name, entry.size);
/// }
/// # Ok::<(), claw_core::ClawError>(())
/// ```
pub fn inspect_archive(path: &Path) -> Result<ArchiveInfo> {
    if !path.is_file() {
        return Err(ClawError::MissingArchive {
            path: path.to_path_buf(),
        });
    }

    let mut zip = zip::ZipArchive::new(File::open(path)?)?;

    let mut entries = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let entry = zip.by_index_raw(i)?;
        entries.push(ArchiveEntry {
            name: entry.name().to_string(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            is_dir: entry.is_dir(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let manifest = match zip.by_name(layout::MANIFEST_FILE) {
        Ok(entry) => Some(Manifest::from_reader(entry)?),
        Err(zip::result::ZipError::FileNotFound) => None,
        Err(e) => return Err(e.into()),
    };

    let mut info = ArchiveInfo {
        archive_path: path.to_path_buf(),
        entries,
        manifest,
        warnings: Vec::new(),
    };
    if info.manifest.is_none() {
        tracing::warn!(archive = %path.display(), "{MISSING_MANIFEST_WARNING}");
        info.warnings.push(MISSING_MANIFEST_WARNING.to_string());
    }

    Ok(info)
}
