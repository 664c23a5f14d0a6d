//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use claw_core::ExportConfig;
use claw_core::Exporter;

pub fn execute(
    args: &ExportArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let mut config = ExportConfig::default();
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }
    if let Some(tool) = &args.tool {
        config = config.with_tool_path(tool);
    }

    let exporter = Exporter::new()
        .source(&args.source_dir)
        .maybe_output(args.output.as_ref())
        .config(config);

    let report = if show_progress {
        let mut progress = CliProgress::new("Exporting");
        add_path_context(exporter.export_with_progress(&mut progress), &args.source_dir)?
    } else {
        add_path_context(exporter.export(), &args.source_dir)?
    };

    formatter.format_export_result(&report)
}
