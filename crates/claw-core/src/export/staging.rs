//! Ephemeral staging tree for export.
//!
//! The staging tree lives in a temporary directory that is deleted when the
//! `StagingTree` is dropped, on success and on every error path.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::Manifest;
use crate::Result;
use crate::layout;
use crate::templates;

/// How the payload of a source directory was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Source already had a `context/` directory, copied verbatim.
    Structured,
    /// Whole source treated as payload, minus regenerated files.
    Flat,
}

/// Temporary archive root assembled before compression.
#[derive(Debug)]
pub struct StagingTree {
    dir: TempDir,
}

impl StagingTree {
    /// Creates an empty staging tree in the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("claw-staging-").tempdir()?;
        Ok(Self { dir })
    }

    /// Archive root of the staging tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Copies the payload of `source` into `<root>/context`.
    ///
    /// `exclude` names a path (typically the container being written) that is
    /// never copied even if it lives inside `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or copied.
    pub fn stage_payload(&self, source: &Path, exclude: Option<&Path>) -> Result<PayloadMode> {
        let context_src = source.join(layout::CONTEXT_DIR);
        let context_dst = self.root().join(layout::CONTEXT_DIR);

        if context_src.is_dir() {
            tracing::debug!(source = %context_src.display(), "staging structured payload");
            copy_tree(&context_src, &context_dst, exclude)?;
            return Ok(PayloadMode::Structured);
        }

        tracing::debug!(source = %source.display(), "staging flat payload");
        fs::create_dir_all(&context_dst)?;

        for entry in fs::read_dir(source)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();

            if name.to_str().is_some_and(layout::is_generated_file) {
                tracing::debug!(name = %name.to_string_lossy(), "skipping regenerated file");
                continue;
            }
            if exclude.is_some_and(|excluded| excluded == path) {
                continue;
            }

            let target = context_dst.join(&name);
            if path.is_dir() {
                copy_tree(&path, &target, exclude)?;
            } else {
                fs::copy(&path, &target)?;
            }
        }

        Ok(PayloadMode::Flat)
    }

    /// Writes fresh `manifest.json`, `README.md` and `SKILL.md` at the root.
    ///
    /// The manifest only sees the payload already staged.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be written.
    pub fn write_metadata(&self) -> Result<Manifest> {
        let manifest = Manifest::generate(self.root())?;
        manifest.write_to(self.root())?;
        templates::write_to(self.root())?;
        Ok(manifest)
    }

    /// Copies the tool binary into the root as the bundled tool copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be read or copied.
    pub fn copy_tool(&self, tool: &Path) -> Result<()> {
        fs::copy(tool, self.root().join(layout::TOOL_FILE))?;
        Ok(())
    }
}

/// Recursively copies `src` to `dst`, following symlinks.
fn copy_tree(src: &Path, dst: &Path, exclude: Option<&Path>) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if exclude.is_some_and(|excluded| excluded == path) {
            continue;
        }

        let relative = path
            .strip_prefix(src)
            .map_err(|e| std::io::Error::other(format!("path outside source: {e}")))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(path, &target)?;
        }
    }
    Ok(())
}
