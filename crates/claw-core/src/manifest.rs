//! Manifest generation and parsing.
//!
//! A manifest is derived fresh on every export from the staged `context/`
//! tree. Import and info only ever read it back.

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use walkdir::WalkDir;

use crate::ClawError;
use crate::Result;
use crate::layout;

/// Metadata describing a container's payload and provenance.
///
/// Deserialization is lenient: absent fields fall back to empty values so
/// manifests written by other tools still summarise.
///
/// # Examples
///
/// ```
/// use claw_core::Manifest;
///
/// let manifest = Manifest::new(vec!["context/a.txt".to_string()]);
/// assert_eq!(manifest.format, "openclaw-context");
/// assert_eq!(manifest.file_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Container kind.
    pub format: String,

    /// Format revision.
    pub version: String,

    /// UTC creation timestamp (RFC 3339 with microseconds).
    pub created_at: String,

    /// Tool that produced the container.
    pub generated_by: String,

    /// Payload files relative to the archive root, `/`-separated.
    ///
    /// Sorted when generated; consumers should treat it as a set.
    pub context_files: Vec<String>,
}

impl Manifest {
    /// Creates a manifest for the given payload files, stamped with the
    /// current time.
    #[must_use]
    pub fn new(context_files: Vec<String>) -> Self {
        Self {
            format: layout::FORMAT_NAME.to_string(),
            version: layout::FORMAT_VERSION.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            generated_by: layout::GENERATED_BY.to_string(),
            context_files,
        }
    }

    /// Derives a manifest by walking `<root>/context`.
    ///
    /// Every file found is recorded relative to `root`. A missing `context/`
    /// directory yields an empty file list.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk fails or a path is not valid
    /// UTF-8.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use claw_core::Manifest;
    ///
    /// let manifest = Manifest::generate("staging")?;
    /// for file in &manifest.context_files {
    ///     println!("{file}");
    /// }
    /// # Ok::<(), claw_core::ClawError>(())
    /// ```
    pub fn generate<P: AsRef<Path>>(root: P) -> Result<Self> {
        Ok(Self::new(collect_context_files(root.as_ref())?))
    }

    /// Number of payload files listed.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.context_files.len()
    }

    /// Serializes to 2-space indented JSON with non-ASCII text kept as is.
    ///
    /// # Errors
    ///
    /// Returns `ClawError::InvalidManifest` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ClawError::InvalidManifest(e.to_string()))
    }

    /// Writes `manifest.json` into `root`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        fs::write(root.join(layout::MANIFEST_FILE), self.to_json()?)?;
        Ok(())
    }

    /// Parses a manifest from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns `ClawError::InvalidManifest` if the bytes are not a JSON
    /// object of the manifest shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ClawError::InvalidManifest(e.to_string()))
    }

    /// Parses a manifest from a reader, e.g. a container entry.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the JSON is invalid.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_slice(&bytes)
    }

    /// Reads `manifest.json` from an extracted archive root.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_from(root: &Path) -> Result<Option<Self>> {
        let path = root.join(layout::MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::from_slice(&fs::read(path)?).map(Some)
    }
}

fn collect_context_files(root: &Path) -> Result<Vec<String>> {
    let context_dir = root.join(layout::CONTEXT_DIR);
    if !context_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&context_dir).sort_by_file_name() {
        let entry = entry?;
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| std::io::Error::other(format!("path outside archive root: {e}")))?;
        files.push(layout::entry_name(relative)?);
    }
    files.sort();

    Ok(files)
}
