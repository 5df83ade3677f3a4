//! Exit codes and structured error output.

use serde::Serialize;

use crate::actions::DeleteError;
use crate::duplicates::FinderError;

/// Process exit codes.
///
/// - 0: Success (completed normally, duplicates found)
/// - 1: General error (unexpected failure)
/// - 2: No duplicates found (completed normally, no duplicates)
/// - 3: Partial success (skipped files, failed copies or failed deletions)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Run completed and duplicates were found.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// Run completed but no duplicates were found.
    NoDuplicates = 2,
    /// Run completed but some files were skipped or failed.
    PartialSuccess = 3,
    /// Run was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "CS000",
            Self::GeneralError => "CS001",
            Self::NoDuplicates => "CS002",
            Self::PartialSuccess => "CS003",
            Self::Interrupted => "CS130",
        }
    }

    /// Classify a fatal error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let interrupted = err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<FinderError>(), Some(FinderError::Interrupted)));
        if interrupted {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }

    /// Exit code for a completed run.
    ///
    /// Problems outrank "no duplicates": a run that skipped files cannot
    /// claim the folder is clean.
    #[must_use]
    pub fn for_outcome(found_duplicates: bool, had_problems: bool) -> Self {
        match (found_duplicates, had_problems) {
            (_, true) => Self::PartialSuccess,
            (true, false) => Self::Success,
            (false, false) => Self::NoDuplicates,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "CS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Path the error refers to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
            path: error_path(err),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}

fn error_path(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<FinderError>() {
            return match e {
                FinderError::Scan(scan) => Some(scan.path().display().to_string()),
                FinderError::Hash(hash) => Some(hash.path().display().to_string()),
                FinderError::IoWithPath { path, .. } => Some(path.display().to_string()),
                FinderError::OutputOverlap { output, .. } => Some(output.display().to_string()),
                FinderError::Interrupted => None,
            };
        }
        cause
            .downcast_ref::<DeleteError>()
            .and_then(DeleteError::path)
            .map(|p| p.display().to_string())
    })
}
