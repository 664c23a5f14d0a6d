//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use claw_core::ImportConfig;
use claw_core::NoopProgress;
use claw_core::import_archive_with_progress;
use std::env;

pub fn execute(
    args: &ImportArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let target_dir = match &args.target_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let config = ImportConfig::default().with_preserve_permissions(!args.no_preserve_permissions);

    let report = if show_progress {
        let mut progress = CliProgress::new("Importing");
        add_path_context(
            import_archive_with_progress(&args.container_file, &target_dir, &config, &mut progress),
            &args.container_file,
        )?
    } else {
        add_path_context(
            import_archive_with_progress(
                &args.container_file,
                &target_dir,
                &config,
                &mut NoopProgress,
            ),
            &args.container_file,
        )?
    };

    formatter.format_import_result(&report)
}
