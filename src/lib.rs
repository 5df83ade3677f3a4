//! cleanset - content-addressed duplicate detection and dataset cleaning
//!
//! Files are identified by the BLAKE3 hash of their full content. The engine
//! finds duplicates inside one folder, across several folders, or copies the
//! files of a source folder that are not already present in an existing one.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use cli::Cli;
use error::ExitCode;

/// Run the command-line application.
///
/// # Errors
///
/// Returns any fatal error; per-file problems are reflected in the exit code.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    log::debug!("cleanset v{}", env!("CARGO_PKG_VERSION"));
    commands::run(&cli)
}
