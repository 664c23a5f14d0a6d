//! Progress bar implementation for CLI operations.

use claw_core::ProgressCallback;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// The bar length is taken from the first entry reported, so the caller does
/// not need to know the entry count up front. Cleared on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a new CLI progress bar labelled with `message`
    /// (e.g. "Exporting", "Importing").
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Exporting [████████░░░░] 42/100 entries (15.2 MB, 3s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} entries ({msg}, {elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(message.to_string());
        bar.set_message(humanize_bytes(0));

        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress: interactive stdout and neither
    /// quiet nor JSON output.
    #[must_use]
    pub fn should_show(quiet: bool, json: bool) -> bool {
        !quiet && !json && Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_message(humanize_bytes(self.bytes_written));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub(crate) fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(512), "512 B");
        assert_eq!(humanize_bytes(1023), "1023 B");
        assert_eq!(humanize_bytes(1024), "1.0 KB");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(humanize_bytes(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(humanize_bytes(1024_u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::new("Testing");

        progress.on_entry_start(Path::new("context/a.txt"), 3, 1);
        progress.on_bytes_written(1024);
        progress.on_bytes_written(512);
        progress.on_entry_complete(Path::new("context/a.txt"));

        assert_eq!(progress.bytes_written, 1536);
        assert_eq!(progress.bar.length(), Some(3));
        assert_eq!(progress.bar.position(), 1);
    }

    #[test]
    fn test_should_show_respects_flags() {
        assert!(!CliProgress::should_show(true, false));
        assert!(!CliProgress::should_show(false, true));
    }
}
