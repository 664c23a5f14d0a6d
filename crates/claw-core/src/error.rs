//! Error types for context archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ClawError`.
pub type Result<T> = std::result::Result<T, ClawError>;

/// Errors that can occur while exporting, importing, or inspecting a
/// container.
#[derive(Error, Debug)]
pub enum ClawError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export source is absent or is not a directory.
    #[error("source directory does not exist: {}", path.display())]
    MissingSource {
        /// The source path that was requested.
        path: PathBuf,
    },

    /// Import or info target is absent or is not a regular file.
    #[error("file not found: {}", path.display())]
    MissingArchive {
        /// The container path that was requested.
        path: PathBuf,
    },

    /// Container entry would be written outside the target directory.
    #[error("path traversal detected: {}", path.display())]
    PathTraversal {
        /// The offending entry name.
        path: PathBuf,
    },

    /// The container could not be read or written by the zip layer.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// `manifest.json` exists but does not decode as a manifest.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// A payload path cannot be represented as a UTF-8 entry name.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending filesystem path.
        path: PathBuf,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the problem.
        reason: String,
    },
}

impl ClawError {
    /// Returns `true` for errors caused by a missing command input
    /// (export source or container file).
    ///
    /// # Examples
    ///
    /// ```
    /// use claw_core::ClawError;
    /// use std::path::PathBuf;
    ///
    /// let err = ClawError::MissingSource {
    ///     path: PathBuf::from("work"),
    /// };
    /// assert!(err.is_missing_input());
    ///
    /// let err = ClawError::InvalidArchive("bad header".to_string());
    /// assert!(!err.is_missing_input());
    /// ```
    #[must_use]
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingSource { .. } | Self::MissingArchive { .. })
    }

    /// Returns `true` if this error represents a rejected container entry.
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }
}

impl From<zip::result::ZipError> for ClawError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::Io(io_err),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for ClawError {
    fn from(err: walkdir::Error) -> Self {
        let message = err.to_string();
        err.into_io_error().map_or_else(
            || Self::Io(std::io::Error::other(format!("walkdir error: {message}"))),
            Self::Io,
        )
    }
}
