//! Builder for exporting containers with a fluent API.

use std::path::Path;
use std::path::PathBuf;

use crate::ClawError;
use crate::ExportConfig;
use crate::ExportReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;

/// Builder for exporting a source directory as a container.
///
/// # Examples
///
/// ```no_run
/// use claw_core::Exporter;
///
/// let report = Exporter::new()
///     .source("work/")
///     .output("snapshot")
///     .compression_level(9)
///     .export()?;
///
/// println!("Wrote {}", report.output_path.display());
/// # Ok::<(), claw_core::ClawError>(())
/// ```
#[derive(Debug, Default)]
pub struct Exporter {
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    config: ExportConfig,
}

impl Exporter {
    /// Creates a new `Exporter` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source directory.
    #[must_use]
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output path. `.claw` is appended when missing.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output path when one is given.
    #[must_use]
    pub fn maybe_output<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        self.output = path.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Sets the full configuration.
    #[must_use]
    pub fn config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the compression level (0 stores, 1-9 deflates).
    #[must_use]
    pub fn compression_level(mut self, level: u8) -> Self {
        self.config.compression_level = Some(level);
        self
    }

    /// Sets the file bundled as the tool copy.
    #[must_use]
    pub fn tool_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.tool_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Exports the container.
    ///
    /// # Errors
    ///
    /// Returns `ClawError::InvalidConfiguration` if no source was set, plus
    /// every error of [`crate::export_archive`].
    pub fn export(self) -> Result<ExportReport> {
        self.export_with_progress(&mut NoopProgress)
    }

    /// Exports the container, reporting per-entry progress.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::export`].
    pub fn export_with_progress(self, progress: &mut dyn ProgressCallback) -> Result<ExportReport> {
        let source = self
            .source
            .ok_or_else(|| ClawError::InvalidConfiguration {
                reason: "source directory not set".to_string(),
            })?;

        crate::export::export_archive_with_progress(
            &source,
            self.output.as_deref(),
            &self.config,
            progress,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let exporter = Exporter::new().source("work").output("out");
        assert_eq!(exporter.source, Some(PathBuf::from("work")));
        assert_eq!(exporter.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_builder_config_methods() {
        let exporter = Exporter::new().compression_level(9).tool_path("bin/claw");
        assert_eq!(exporter.config.compression_level, Some(9));
        assert_eq!(exporter.config.tool_path, Some(PathBuf::from("bin/claw")));
    }

    #[test]
    fn test_builder_maybe_output() {
        let exporter = Exporter::new().output("x").maybe_output(None::<&str>);
        assert_eq!(exporter.output, None);
    }

    #[test]
    fn test_builder_no_source_error() {
        let result = Exporter::new().output("out").export();
        assert!(matches!(
            result.unwrap_err(),
            ClawError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_builder_missing_source_error() {
        let result = Exporter::new()
            .source("/definitely/not/here")
            .tool_path("unused")
            .export();
        assert!(matches!(result.unwrap_err(), ClawError::MissingSource { .. }));
    }
}
