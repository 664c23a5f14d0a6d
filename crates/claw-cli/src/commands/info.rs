//! Info command implementation

use crate::cli::InfoArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use claw_core::inspect_archive;

pub fn execute(args: &InfoArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let info = add_path_context(inspect_archive(&args.container_file), &args.container_file)?;
    formatter.format_archive_info(&info)
}
