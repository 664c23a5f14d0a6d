//! Fixed layout of a context archive.
//!
//! Every container holds exactly five top-level slots: the manifest, the two
//! bundled documents, a copy of the tool, and the `context/` payload tree.

use std::path::Component;
use std::path::Path;

use crate::ClawError;
use crate::Result;

/// Container kind recorded in every manifest.
pub const FORMAT_NAME: &str = "openclaw-context";

/// Current container format revision.
pub const FORMAT_VERSION: &str = "0.1";

/// Tool identifier recorded in every manifest.
pub const GENERATED_BY: &str = "claw";

/// Canonical container extension, without the leading dot.
pub const EXTENSION: &str = "claw";

/// Manifest file name at the archive root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Human-readable overview at the archive root.
pub const README_FILE: &str = "README.md";

/// Agent instructions at the archive root.
pub const SKILL_FILE: &str = "SKILL.md";

/// Name of the bundled tool copy at the archive root.
pub const TOOL_FILE: &str = if cfg!(windows) { "claw.exe" } else { "claw" };

/// Payload directory at the archive root.
pub const CONTEXT_DIR: &str = "context";

/// Root-level names that are regenerated on every export and therefore never
/// treated as payload of a flat source.
///
/// `claw.py` is the tool name used by script-built containers.
pub const GENERATED_FILES: &[&str] = &[
    MANIFEST_FILE,
    README_FILE,
    SKILL_FILE,
    "claw",
    "claw.exe",
    "claw.py",
];

/// Returns `true` if a root-level name belongs to the generated skip-list.
///
/// # Examples
///
/// ```
/// use claw_core::layout::is_generated_file;
///
/// assert!(is_generated_file("manifest.json"));
/// assert!(is_generated_file("claw.py"));
/// assert!(!is_generated_file("notes.txt"));
/// ```
#[must_use]
pub fn is_generated_file(name: &str) -> bool {
    GENERATED_FILES.contains(&name)
}

/// Converts a relative filesystem path into a container entry name.
///
/// Components are joined with `/` regardless of the host separator and `.`
/// components are dropped.
///
/// # Errors
///
/// Returns `ClawError::NonUtf8Path` if a component is not valid UTF-8 and
/// `ClawError::PathTraversal` if the path is absolute or contains `..`.
///
/// # Examples
///
/// ```
/// use claw_core::layout::entry_name;
/// use std::path::Path;
///
/// let name = entry_name(Path::new("context/sub/b.txt"))?;
/// assert_eq!(name, "context/sub/b.txt");
/// # Ok::<(), claw_core::ClawError>(())
/// ```
pub fn entry_name(relative: &Path) -> Result<String> {
    let mut parts: Vec<&str> = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| ClawError::NonUtf8Path {
                    path: relative.to_path_buf(),
                })?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ClawError::PathTraversal {
                    path: relative.to_path_buf(),
                });
            }
        }
    }

    Ok(parts.join("/"))
}

/// Returns `true` if `path` already carries the canonical `.claw` extension.
///
/// The comparison is on the literal file name suffix, so `out.CLAW` does not
/// qualify and gets the extension appended.
#[must_use]
pub fn has_container_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(EXTENSION))
        .is_some_and(|stem| stem.ends_with('.'))
}
