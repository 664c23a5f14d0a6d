//! Validated container entry paths.
//!
//! Container entry names are untrusted input. A `SafePath` is a relative,
//! normalized path that cannot leave the directory it is joined onto.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ClawError;
use crate::Result;

/// A container entry path proven to stay inside the extraction target.
///
/// # Examples
///
/// ```
/// use claw_core::SafePath;
///
/// let safe = SafePath::validate("./context/notes.txt")?;
/// assert_eq!(safe.as_path(), std::path::Path::new("context/notes.txt"));
///
/// assert!(SafePath::validate("../outside.txt").is_err());
/// # Ok::<(), claw_core::ClawError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates an entry name.
    ///
    /// Rejects NUL bytes, absolute paths, drive prefixes and any `..`
    /// component. `.` components are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ClawError::PathTraversal` for any rejected name.
    pub fn validate(name: &str) -> Result<Self> {
        let reject = || ClawError::PathTraversal {
            path: PathBuf::from(name),
        };

        if name.contains('\0') {
            return Err(reject());
        }

        let path = Path::new(name);
        if path.is_absolute() {
            return Err(reject());
        }

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(reject());
                }
            }
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized relative path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins this path onto `base`.
    #[must_use]
    pub fn join_onto(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }
}
