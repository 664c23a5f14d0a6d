//! Claw CLI - export, import and inspect portable OpenClaw context archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use std::process::ExitCode;

use clap::CommandFactory;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let Some(command) = &cli.command else {
        let _ = cli::Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = progress::CliProgress::should_show(cli.quiet, cli.json);

    let result = match command {
        cli::Commands::Export(args) => {
            commands::export::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Import(args) => {
            commands::import::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Info(args) => commands::info::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            formatter.format_error(command.name(), &err);
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
