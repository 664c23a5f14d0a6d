//! Error conversion utilities for CLI.
//!
//! Converts claw-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use claw_core::ClawError;
use std::path::Path;

/// Converts `ClawError` to a user-friendly anyhow error with context.
///
/// `subject` is the path the command was operating on (source directory or
/// container).
pub fn convert_claw_error(err: ClawError, subject: &Path) -> anyhow::Error {
    if err.is_security_violation() {
        return anyhow!(
            "Security violation: container '{}' rejected: {err}\n\
             HINT: This container may be malicious. Nothing was extracted.",
            subject.display()
        );
    }

    match err {
        ClawError::MissingSource { path } => {
            anyhow!(
                "source directory does not exist: {}\n\
                 HINT: Pass an existing directory to export.",
                path.display()
            )
        }
        ClawError::MissingArchive { path } => {
            anyhow!(
                "file not found: {}\n\
                 HINT: Check the container path; containers usually end in .claw.",
                path.display()
            )
        }
        ClawError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid container '{}': {}\n\
                 HINT: The file may be corrupted or not a .claw container.",
                subject.display(),
                reason
            )
        }
        ClawError::InvalidManifest(reason) => {
            anyhow!(
                "Invalid manifest.json in '{}': {}\n\
                 HINT: Re-export the source directory to regenerate the manifest.",
                subject.display(),
                reason
            )
        }
        ClawError::Io(io_err) => {
            anyhow!("I/O error while processing '{}': {}", subject.display(), io_err)
        }
        _ => anyhow::Error::from(err).context(format!("Error processing '{}'", subject.display())),
    }
}

/// Adds context to a core result.
pub fn add_path_context<T>(result: Result<T, ClawError>, subject: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_claw_error(e, subject))
}
