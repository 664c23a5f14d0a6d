//! Output formatter trait for CLI results.

use anyhow::Result;
use claw_core::ArchiveInfo;
use claw_core::ExportReport;
use claw_core::ImportReport;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format export result
    fn format_export_result(&self, report: &ExportReport) -> Result<()>;

    /// Format import result
    fn format_import_result(&self, report: &ImportReport) -> Result<()>;

    /// Format container summary and listing
    fn format_archive_info(&self, info: &ArchiveInfo) -> Result<()>;

    /// Format error message for a failed operation
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
