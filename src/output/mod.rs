//! Output formatters for dedup results.
//!
//! - text for people
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use cleanset::duplicates::DedupEngine;
//! use cleanset::error::ExitCode;
//! use cleanset::output::JsonOutput;
//! use std::path::Path;
//!
//! let engine = DedupEngine::with_defaults();
//! let report = engine.dedup_within_folder(Path::new(".")).unwrap();
//!
//! let output = JsonOutput::from_dedup(&report, ExitCode::Success);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

pub use csv::{CsvOutput, CsvOutputError};
pub use json::{JsonOutput, JsonOutputError};
pub use text::TextOutput;
