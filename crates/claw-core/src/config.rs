//! Configuration for export and import operations.

use std::path::PathBuf;

use crate::ClawError;
use crate::Result;

/// Configuration for building a container.
///
/// # Examples
///
/// ```
/// use claw_core::ExportConfig;
///
/// let config = ExportConfig::default()
///     .with_compression_level(9)
///     .with_tool_path("/usr/local/bin/claw");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Deflate level (1-9), or `Some(0)` to store entries uncompressed.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// File bundled into the container as the tool copy.
    ///
    /// `None` means the currently running executable.
    ///
    /// Default: `None`.
    pub tool_path: Option<PathBuf>,

    /// Record unix permission bits for each entry.
    ///
    /// Keeps the bundled tool executable after import.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(6),
            tool_path: None,
            preserve_permissions: true,
        }
    }
}

impl ExportConfig {
    /// Creates a new `ExportConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets the file bundled as the tool copy.
    #[must_use]
    pub fn with_tool_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.tool_path = Some(path.into());
        self
    }

    /// Sets whether permission bits are recorded.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClawError::InvalidConfiguration` if the compression level is
    /// above 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(ClawError::InvalidConfiguration {
                reason: format!("compression level must be 0-9, got {level}"),
            });
        }
        Ok(())
    }

    /// Resolves the tool copy source.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured and the current executable
    /// cannot be located.
    pub fn resolve_tool_path(&self) -> Result<PathBuf> {
        match &self.tool_path {
            Some(path) => Ok(path.clone()),
            None => Ok(std::env::current_exe()?),
        }
    }
}

/// Configuration for extracting a container.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Apply recorded permission bits (masked to `0o777`) to extracted files.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
        }
    }
}

impl ImportConfig {
    /// Creates a new `ImportConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether recorded permission bits are applied.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }
}
