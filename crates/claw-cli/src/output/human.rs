//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use claw_core::ArchiveInfo;
use claw_core::ExportReport;
use claw_core::ImportReport;
use claw_core::Manifest;
use console::Term;
use console::style;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    /// Shows `?` for manifest fields a foreign manifest left empty.
    fn or_unknown(value: &str) -> &str {
        if value.is_empty() { "?" } else { value }
    }

    fn manifest_lines(manifest: &Manifest) -> [String; 3] {
        [
            format!(
                "  format:  {} v{}",
                Self::or_unknown(&manifest.format),
                Self::or_unknown(&manifest.version)
            ),
            format!("  created: {}", Self::or_unknown(&manifest.created_at)),
            format!("  files:   {} context file(s)", manifest.file_count()),
        ]
    }

    fn headline(&self, label: &str, rest: &str) -> String {
        if self.use_colors {
            format!("{} {rest}", style(label).green().bold())
        } else {
            format!("{label} {rest}")
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn warning(&self, message: &str) {
        if self.use_colors {
            self.line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            self.line(&format!("WARNING: {message}"));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_export_result(&self, report: &ExportReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let manifest = &report.manifest;
        self.line(&self.headline("Exported:", &report.output_path.display().to_string()));
        self.line(&format!(
            "  format:  {} v{}",
            manifest.format, manifest.version
        ));
        self.line(&format!(
            "  files:   {} context file(s)",
            report.context_file_count()
        ));

        if self.verbose {
            self.line(&format!("  entries: {}", report.entries_written));
            self.line(&format!(
                "  size:    {} ({} compressed, {:.1}x)",
                humanize_bytes(report.bytes_written),
                humanize_bytes(report.bytes_compressed),
                report.compression_ratio()
            ));
            self.line(&format!("  took:    {:?}", report.duration));
        }

        Ok(())
    }

    fn format_import_result(&self, report: &ImportReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let archive = report.archive_path.display().to_string();
        let target = report.target_dir.display().to_string();

        if let Some(manifest) = &report.manifest {
            self.line(&self.headline("Imported:", &archive));
            for line in Self::manifest_lines(manifest) {
                self.line(&line);
            }
            self.line(&format!("  into:    {target}"));
        } else {
            self.line(&self.headline("Imported:", &format!("{archive} -> {target}")));
        }

        for warning in &report.warnings {
            self.warning(warning);
        }

        if self.verbose {
            self.line(&format!("  entries: {}", report.entries_extracted));
            self.line(&format!("  size:    {}", humanize_bytes(report.bytes_written)));
            self.line(&format!("  took:    {:?}", report.duration));
        }

        Ok(())
    }

    fn format_archive_info(&self, info: &ArchiveInfo) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.line(&self.headline("Archive:", &info.archive_path.display().to_string()));
        self.line(&format!("  entries: {}", info.total_entries()));

        if let Some(manifest) = &info.manifest {
            for line in Self::manifest_lines(manifest) {
                self.line(&line);
            }
            self.line(&format!(
                "  generator: {}",
                Self::or_unknown(&manifest.generated_by)
            ));
        }
        for warning in &info.warnings {
            self.warning(warning);
        }

        self.line("");
        self.line("Contents:");
        for entry in &info.entries {
            if self.verbose {
                self.line(&format!(
                    "  {}  ({} bytes, {} compressed)",
                    entry.name, entry.size, entry.compressed_size
                ));
            } else {
                self.line(&format!("  {}  ({} bytes)", entry.name, entry.size));
            }
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if console::colors_enabled_stderr() {
            let _ = term.write_line(&format!("{} {error:#}", style("Error:").red().bold()));
        } else {
            let _ = term.write_line(&format!("Error: {error:#}"));
        }
    }
}
