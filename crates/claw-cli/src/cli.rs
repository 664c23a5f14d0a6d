//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "claw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a directory into a .claw container
    Export(ExportArgs),
    /// Extract a .claw container into a directory
    Import(ImportArgs),
    /// Show a container's manifest and contents without extracting
    Info(InfoArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Export(_) => "export",
            Self::Import(_) => "import",
            Self::Info(_) => "info",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct ExportArgs {
    /// Directory to pack
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Container path (default: <SOURCE_DIR name>.claw in the current directory)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// File bundled as the tool copy (default: this executable)
    #[arg(long, value_name = "PATH")]
    pub tool: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// Path to the .claw container
    #[arg(value_name = "CONTAINER")]
    pub container_file: PathBuf,

    /// Target directory (default: current directory)
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    /// Do not apply permission bits recorded in the container
    #[arg(long)]
    pub no_preserve_permissions: bool,
}

#[derive(clap::Args)]
pub struct InfoArgs {
    /// Path to the .claw container
    #[arg(value_name = "CONTAINER")]
    pub container_file: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
