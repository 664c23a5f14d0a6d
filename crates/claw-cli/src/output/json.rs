//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use claw_core::ArchiveEntry;
use claw_core::ArchiveInfo;
use claw_core::ExportReport;
use claw_core::ImportReport;
use claw_core::Manifest;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExportOutput<'a> {
    output_path: String,
    manifest: &'a Manifest,
    context_file_count: usize,
    entries_written: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    duration_ms: u128,
}

impl<'a> From<&'a ExportReport> for ExportOutput<'a> {
    fn from(report: &'a ExportReport) -> Self {
        Self {
            output_path: report.output_path.display().to_string(),
            manifest: &report.manifest,
            context_file_count: report.context_file_count(),
            entries_written: report.entries_written,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

#[derive(Serialize)]
struct ImportOutput<'a> {
    archive_path: String,
    target_dir: String,
    entries_extracted: usize,
    bytes_written: u64,
    manifest: Option<&'a Manifest>,
    duration_ms: u128,
    warnings: &'a [String],
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    name: &'a str,
    size: u64,
    compressed_size: u64,
    is_dir: bool,
}

impl<'a> From<&'a ArchiveEntry> for EntryOutput<'a> {
    fn from(entry: &'a ArchiveEntry) -> Self {
        Self {
            name: &entry.name,
            size: entry.size,
            compressed_size: entry.compressed_size,
            is_dir: entry.is_dir,
        }
    }
}

#[derive(Serialize)]
struct InfoOutput<'a> {
    archive_path: String,
    total_entries: usize,
    total_size: u64,
    manifest: Option<&'a Manifest>,
    entries: Vec<EntryOutput<'a>>,
    warnings: &'a [String],
}

impl OutputFormatter for JsonFormatter {
    fn format_export_result(&self, report: &ExportReport) -> Result<()> {
        Self::output(&JsonOutput::success("export", ExportOutput::from(report)))
    }

    fn format_import_result(&self, report: &ImportReport) -> Result<()> {
        let data = ImportOutput {
            archive_path: report.archive_path.display().to_string(),
            target_dir: report.target_dir.display().to_string(),
            entries_extracted: report.entries_extracted,
            bytes_written: report.bytes_written,
            manifest: report.manifest.as_ref(),
            duration_ms: report.duration.as_millis(),
            warnings: &report.warnings,
        };

        Self::output(&JsonOutput::success("import", data))
    }

    fn format_archive_info(&self, info: &ArchiveInfo) -> Result<()> {
        let data = InfoOutput {
            archive_path: info.archive_path.display().to_string(),
            total_entries: info.total_entries(),
            total_size: info.total_size(),
            manifest: info.manifest.as_ref(),
            entries: info.entries.iter().map(EntryOutput::from).collect(),
            warnings: &info.warnings,
        };

        Self::output(&JsonOutput::success("info", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_export_output_fields() {
        let report = ExportReport {
            output_path: PathBuf::from("/tmp/out.claw"),
            manifest: Manifest::new(vec!["context/a.txt".to_string()]),
            entries_written: 5,
            bytes_written: 2000,
            bytes_compressed: 1000,
            duration: Duration::from_millis(12),
        };

        let json = serde_json::to_value(ExportOutput::from(&report)).unwrap();
        assert_eq!(json["output_path"], "/tmp/out.claw");
        assert_eq!(json["manifest"]["format"], "openclaw-context");
        assert_eq!(json["manifest"]["context_files"][0], "context/a.txt");
        assert_eq!(json["context_file_count"], 1);
        assert_eq!(json["compression_ratio"], 2.0);
        assert_eq!(json["duration_ms"], 12);
    }

    #[test]
    fn test_entry_output_fields() {
        let entry = ArchiveEntry {
            name: "context/a.txt".to_string(),
            size: 10,
            compressed_size: 8,
            is_dir: false,
        };
        let json = serde_json::to_value(EntryOutput::from(&entry)).unwrap();
        assert_eq!(json["name"], "context/a.txt");
        assert_eq!(json["size"], 10);
        assert_eq!(json["is_dir"], false);
    }
}
