//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping files by content identity ([`groups`])
//! - Canonical selection and duplicate pair emission
//! - The within-folder, across-folder and copy-uniques modes ([`finder`])

pub mod finder;
pub mod groups;

pub use finder::{
    output_name, CopiedFile, CopyReport, DedupEngine, DedupReport, EngineConfig, FinderError,
    Grouping, ScanWarning, DEFAULT_IO_THREADS, DEFAULT_OUTPUT_PREFIX,
};
pub use groups::{CanonicalPolicy, DuplicatePair, IdentityGroup, IdentityIndex, ScanSummary};
