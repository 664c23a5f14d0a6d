//! Subcommand implementations.

pub mod completion;
pub mod export;
pub mod import;
pub mod info;
