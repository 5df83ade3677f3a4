//! JSON output formatter for dedup results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "pairs": [
//!     {
//!       "duplicate": "/data/b/f3.png",
//!       "canonical": "/data/a/f1.png",
//!       "hash": "abc123...",
//!       "size": 1024
//!     }
//!   ],
//!   "summary": {
//!     "total_entries": 4,
//!     "hashed": 4,
//!     "duplicate_files": 1,
//!     "wasted_bytes": 1024,
//!     "duration_ms": 12,
//!     "exit_code": 0,
//!     "exit_code_name": "CS000"
//!   },
//!   "warnings": []
//! }
//! ```
//!
//! Copy-uniques runs add `copied`, `copied_files` and `copy_failures`.
//! Runs that delete add a `deletion` object.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::actions::BatchDeleteResult;
use crate::duplicates::{CopiedFile, CopyReport, DedupReport, DuplicatePair, ScanSummary, ScanWarning};
use crate::error::ExitCode;
use crate::scanner::hash_to_hex;

/// A single duplicate pair in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonPair {
    /// Path of the redundant copy
    pub duplicate: String,
    /// Path of the copy that is kept
    pub canonical: String,
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// File size in bytes
    pub size: u64,
    /// Role of the duplicate's folder
    pub duplicate_origin: String,
    /// Role of the canonical's folder
    pub canonical_origin: String,
}

impl JsonPair {
    fn from_pair(pair: &DuplicatePair) -> Self {
        Self {
            duplicate: path_string(&pair.duplicate.path),
            canonical: path_string(&pair.canonical.path),
            hash: pair.hash_hex(),
            size: pair.size(),
            duplicate_origin: pair.duplicate.origin.clone(),
            canonical_origin: pair.canonical.origin.clone(),
        }
    }
}

/// A copied unique file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonCopiedFile {
    /// Original location
    pub source: String,
    /// Location in the output folder
    pub destination: String,
    /// BLAKE3 hash as hexadecimal string
    pub hash: String,
    /// Bytes copied
    pub size: u64,
}

impl JsonCopiedFile {
    fn from_copied(file: &CopiedFile) -> Self {
        Self {
            source: path_string(&file.source),
            destination: path_string(&file.destination),
            hash: hash_to_hex(&file.hash),
            size: file.size,
        }
    }
}

/// A skipped or failed file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonWarning {
    /// File or folder concerned
    pub path: String,
    /// What went wrong
    pub message: String,
}

impl JsonWarning {
    fn from_warning(warning: &ScanWarning) -> Self {
        Self {
            path: path_string(&warning.path),
            message: warning.message.clone(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Entries listed across all folders
    pub total_entries: usize,
    /// Regular files among them
    pub candidates: usize,
    /// Non-regular entries skipped
    pub skipped_entries: usize,
    /// Files hashed successfully
    pub hashed: usize,
    /// Files that could not be hashed
    pub failed: usize,
    /// Distinct content identities
    pub unique_identities: usize,
    /// Groups containing duplicates
    pub duplicate_groups: usize,
    /// Files reported as duplicates
    pub duplicate_files: usize,
    /// Bytes held by duplicates
    pub wasted_bytes: u64,
    /// Duration of the run in milliseconds
    pub duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "CS000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from run counters, duration and exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, duration: Duration, exit_code: ExitCode) -> Self {
        Self {
            total_entries: summary.total_entries,
            candidates: summary.candidates,
            skipped_entries: summary.skipped_entries,
            hashed: summary.hashed,
            failed: summary.failed,
            unique_identities: summary.unique_identities,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            wasted_bytes: summary.wasted_bytes,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Outcome of the deletion step in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDeletion {
    /// Paths deleted
    pub deleted: Vec<String>,
    /// Paths that could not be deleted, with reasons
    pub failed: Vec<JsonWarning>,
    /// Duplicate paths kept because they are canonical elsewhere
    pub protected: Vec<String>,
    /// Bytes freed
    pub bytes_freed: u64,
    /// Whether files were removed permanently
    pub permanent: bool,
}

impl JsonDeletion {
    fn from_result(result: &BatchDeleteResult, permanent: bool) -> Self {
        Self {
            deleted: result.successes.iter().map(|s| path_string(&s.path)).collect(),
            failed: result
                .failures
                .iter()
                .map(|(path, message)| JsonWarning {
                    path: path_string(path),
                    message: message.clone(),
                })
                .collect(),
            protected: result.protected.iter().map(|p| path_string(p)).collect(),
            bytes_freed: result.bytes_freed,
            permanent,
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate pairs
    pub pairs: Vec<JsonPair>,
    /// Run summary statistics
    pub summary: JsonSummary,
    /// Skipped files
    pub warnings: Vec<JsonWarning>,
    /// Number of files copied (copy-uniques only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copied: Option<usize>,
    /// Copied files (copy-uniques only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copied_files: Option<Vec<JsonCopiedFile>>,
    /// Failed copies (copy-uniques only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_failures: Option<Vec<JsonWarning>>,
    /// Deletion outcome, when deletion ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion: Option<JsonDeletion>,
}

impl JsonOutput {
    /// Build output for a within- or across-folder run.
    #[must_use]
    pub fn from_dedup(report: &DedupReport, exit_code: ExitCode) -> Self {
        Self {
            pairs: report.pairs.iter().map(JsonPair::from_pair).collect(),
            summary: JsonSummary::from_scan_summary(&report.summary, report.duration, exit_code),
            warnings: report.warnings.iter().map(JsonWarning::from_warning).collect(),
            copied: None,
            copied_files: None,
            copy_failures: None,
            deletion: None,
        }
    }

    /// Build output for a copy-uniques run.
    #[must_use]
    pub fn from_copy(report: &CopyReport, exit_code: ExitCode) -> Self {
        Self {
            pairs: report.pairs.iter().map(JsonPair::from_pair).collect(),
            summary: JsonSummary::from_scan_summary(&report.summary, report.duration, exit_code),
            warnings: report.warnings.iter().map(JsonWarning::from_warning).collect(),
            copied: Some(report.copied),
            copied_files: Some(report.copied_files.iter().map(JsonCopiedFile::from_copied).collect()),
            copy_failures: Some(report.copy_failures.iter().map(JsonWarning::from_warning).collect()),
            deletion: None,
        }
    }

    /// Attach the outcome of a deletion step.
    #[must_use]
    pub fn with_deletion(mut self, result: &BatchDeleteResult, permanent: bool) -> Self {
        self.deletion = Some(JsonDeletion::from_result(result, permanent));
        self
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
