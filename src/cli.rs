//! Command-line interface definitions for cleanset.
//!
//! Global options control verbosity, color and error format; each
//! subcommand selects one engine mode.
//!
//! # Example
//!
//! ```bash
//! # Duplicates inside one folder
//! cleanset within ./photos
//!
//! # Duplicates across folders, earliest folder wins
//! cleanset across ./train ./val ./test --format json
//!
//! # Copy files from ./incoming that are not already in ./dataset
//! cleanset merge --source ./incoming --existing ./dataset --output ./cleaned
//!
//! # Delete duplicates after an interactive prompt
//! cleanset within ./photos --delete
//!
//! # Merge, then trash the incoming files the dataset already has
//! cleanset merge --source ./incoming --existing ./dataset --output ./cleaned --delete
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::duplicates::CanonicalPolicy;
use crate::scanner::EnumerationOrder;

/// Content-addressed duplicate finder and dataset cleaner.
///
/// Files are compared by BLAKE3 hash of their full content. Only the direct
/// children of each folder are considered.
#[derive(Debug, Parser)]
#[command(name = "cleanset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Configuration file (default: platform config dir/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find duplicates among the files of one folder
    Within(WithinArgs),
    /// Find duplicates across several folders (earlier folders win)
    Across(AcrossArgs),
    /// Copy files from a source folder that are not already in an existing folder
    Merge(MergeArgs),
}

/// Arguments for the within subcommand.
#[derive(Debug, Args)]
pub struct WithinArgs {
    /// Folder to scan
    #[arg(value_name = "DIR")]
    pub folder: PathBuf,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub delete: DeleteOptions,
}

/// Arguments for the across subcommand.
#[derive(Debug, Args)]
pub struct AcrossArgs {
    /// Folders to compare, in priority order
    #[arg(value_name = "DIR", num_args = 2.., required = true)]
    pub folders: Vec<PathBuf>,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub delete: DeleteOptions,
}

/// Arguments for the merge subcommand.
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Folder with candidate files
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,

    /// Folder with files already kept
    #[arg(long, value_name = "DIR")]
    pub existing: PathBuf,

    /// Folder that receives the new unique files (created if missing)
    #[arg(long, value_name = "DIR")]
    pub output: PathBuf,

    /// Name prefix for copied files
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub scan: ScanOptions,

    // Deletes source files whose content is already in the existing folder
    #[command(flatten)]
    pub delete: DeleteOptions,
}

/// Options shared by every mode.
#[derive(Debug, Args, Default)]
pub struct ScanOptions {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Listing order within a folder
    #[arg(long, value_enum)]
    pub order: Option<EnumerationOrder>,

    /// Which copy of a duplicate group is kept
    #[arg(long, value_enum)]
    pub canonical: Option<CanonicalPolicy>,

    /// Number of I/O threads for hashing (default: 4)
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Abort on the first file that cannot be read
    #[arg(long)]
    pub strict: bool,

    /// Skip hidden files (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Give up on a single file after this many seconds
    #[arg(long, value_name = "SECS")]
    pub read_timeout: Option<u64>,
}

impl ScanOptions {
    /// Overlay these flags on a loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(order) = self.order {
            config.order = order;
        }
        if let Some(canonical) = self.canonical {
            config.canonical = canonical;
        }
        if let Some(threads) = self.io_threads {
            config.io_threads = threads;
        }
        if let Some(secs) = self.read_timeout {
            config.read_timeout_secs = Some(secs);
        }
        config.strict |= self.strict;
        config.skip_hidden |= self.skip_hidden;
    }
}

/// Options for deleting the duplicates that were found.
#[derive(Debug, Args, Default)]
pub struct DeleteOptions {
    /// Delete duplicates after the scan (canonical copies are kept)
    #[arg(long)]
    pub delete: bool,

    /// Use permanent deletion instead of moving to trash
    ///
    /// Warning: Files cannot be recovered after permanent deletion.
    #[arg(long, requires = "delete")]
    pub permanent: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long, requires = "delete")]
    pub yes: bool,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl OutputFormat {
    /// Whether the format is meant for other programs.
    #[must_use]
    pub fn is_machine_readable(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
