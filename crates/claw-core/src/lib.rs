//! Portable context archives for OpenClaw workspaces.
//!
//! `claw-core` packs a directory into a single `.claw` container (a zip file)
//! holding the payload under `context/`, a generated `manifest.json`, two
//! bundled documents and a copy of the tool itself. Containers can be
//! extracted again with path validation, or summarised without extraction.
//!
//! # Examples
//!
//! ```no_run
//! use claw_core::ExportConfig;
//! use claw_core::ImportConfig;
//! use claw_core::export_archive;
//! use claw_core::import_archive;
//! use claw_core::inspect_archive;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = export_archive(Path::new("work"), None, &ExportConfig::default())?;
//! println!("Exported {} context files", report.context_file_count());
//!
//! let info = inspect_archive(&report.output_path)?;
//! println!("{} entries", info.total_entries());
//!
//! import_archive(&report.output_path, Path::new("restored"), &ImportConfig::default())?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod copy;
pub mod error;
pub mod export;
pub mod import;
pub mod info;
pub mod layout;
pub mod manifest;
pub mod report;
pub mod safe_path;
pub mod templates;

#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use config::ExportConfig;
pub use config::ImportConfig;
pub use error::ClawError;
pub use error::Result;
pub use export::Exporter;
pub use export::export_archive;
pub use export::export_archive_with_progress;
pub use import::import_archive;
pub use import::import_archive_with_progress;
pub use info::ArchiveEntry;
pub use info::ArchiveInfo;
pub use info::inspect_archive;
pub use manifest::Manifest;
pub use report::ExportReport;
pub use report::ImportReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use safe_path::SafePath;
