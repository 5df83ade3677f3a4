//! Safe file deletion using trash crate.
//!
//! # Overview
//!
//! This module removes the duplicate half of [`DuplicatePair`]s:
//! - Move to system trash (default, recoverable)
//! - Permanent deletion (with explicit flag)
//! - Batch operations with progress reporting
//!
//! # Safety
//!
//! Only `duplicate` paths are ever deleted. A path that is the `canonical`
//! member of any pair is protected even if it also appears as a duplicate,
//! and so is a file that a canonical symlink resolves to.
//! Nothing is deleted until a [`ConfirmationGate`] approves the whole batch.
//!
//! # Example
//!
//! ```no_run
//! use cleanset::actions::delete::{delete_duplicates, AssumeYes, DeleteConfig, NoDeleteProgress};
//! use cleanset::duplicates::DedupEngine;
//! use std::path::Path;
//!
//! let report = DedupEngine::with_defaults().dedup_within_folder(Path::new("photos")).unwrap();
//! let result = delete_duplicates::<_, NoDeleteProgress>(
//!     &report.pairs,
//!     &DeleteConfig::default(),
//!     &AssumeYes,
//!     None,
//! )
//! .unwrap();
//! println!("{}", result.summary());
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use thiserror::Error;

use crate::duplicates::DuplicatePair;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0} - try running with elevated privileges")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("permanent delete failed for {path}: {message}")]
    PermanentDeleteFailed { path: PathBuf, message: String },

    /// The caller did not approve the deletion.
    #[error("deletion of {count} file(s) was not confirmed")]
    NotConfirmed { count: usize },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }

    /// Get the path associated with this error (if any).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::PermanentDeleteFailed { path: p, .. }
            | Self::Io { path: p, .. } => Some(p),
            Self::NotConfirmed { .. } => None,
        }
    }
}

/// Result of a successful deletion operation.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Whether deletion was permanent (true) or to trash (false).
    pub permanent: bool,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, permanent: bool) -> Self {
        Self {
            path,
            size,
            permanent,
        }
    }
}

/// Results of a batch deletion operation.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions with their errors.
    pub failures: Vec<(PathBuf, String)>,
    /// Duplicate paths refused because they are canonical elsewhere.
    pub protected: Vec<PathBuf>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted deletions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Deleted {} file(s), freed {}",
            self.success_count(),
            ByteSize(self.bytes_freed)
        );
        if !self.all_succeeded() {
            text.push_str(&format!(", {} failed", self.failure_count()));
        }
        if !self.protected.is_empty() {
            text.push_str(&format!(", {} protected", self.protected.len()));
        }
        text
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Use permanent deletion instead of trash.
    pub permanent: bool,
    /// Continue on error (process remaining files even if some fail).
    pub continue_on_error: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            permanent: false,
            continue_on_error: true,
        }
    }
}

impl DeleteConfig {
    /// Create config for trash deletion.
    #[must_use]
    pub fn trash() -> Self {
        Self::default()
    }

    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self {
            permanent: true,
            ..Self::default()
        }
    }

    /// Enable/disable continue on error.
    #[must_use]
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

/// Callback trait for deletion progress reporting.
pub trait DeleteProgressCallback: Send + Sync {
    /// Called before each file deletion.
    fn on_before_delete(&self, path: &Path, index: usize, total: usize);

    /// Called after successful deletion.
    fn on_delete_success(&self, path: &Path, size: u64);

    /// Called after failed deletion.
    fn on_delete_failure(&self, path: &Path, error: &str);

    /// Called when batch operation completes.
    fn on_complete(&self, result: &BatchDeleteResult);
}

/// A callback that ignores every event.
///
/// Useful as the type parameter when no callback is passed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeleteProgress;

impl DeleteProgressCallback for NoDeleteProgress {
    fn on_before_delete(&self, _: &Path, _: usize, _: usize) {}
    fn on_delete_success(&self, _: &Path, _: u64) {}
    fn on_delete_failure(&self, _: &Path, _: &str) {}
    fn on_complete(&self, _: &BatchDeleteResult) {}
}

/// The files a set of pairs would delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    /// Duplicate paths to delete, first-seen order, no repeats
    pub targets: Vec<PathBuf>,
    /// Duplicate paths kept because they are canonical in some pair
    pub protected: Vec<PathBuf>,
    /// Combined size of the targets in bytes
    pub bytes: u64,
}

impl DeletionPlan {
    /// Build a plan from duplicate pairs.
    ///
    /// A duplicate is protected when its path is also a canonical path, or
    /// when it is a regular file that some canonical path resolves to. A
    /// symlink canonical therefore keeps its target alive, while a symlink
    /// duplicate can still be removed without touching any content.
    #[must_use]
    pub fn from_pairs(pairs: &[DuplicatePair]) -> Self {
        let mut canonicals: HashSet<PathBuf> = HashSet::new();
        for pair in pairs {
            let path = &pair.canonical.path;
            if canonicals.insert(path.clone()) {
                canonicals.insert(resolve(path));
            }
        }
        let mut seen: HashSet<&Path> = HashSet::new();
        let mut plan = Self::default();

        for pair in pairs {
            let path = pair.duplicate.path.as_path();
            if !seen.insert(path) {
                continue;
            }
            let reached_by_canonical =
                !is_symlink(path) && canonicals.contains(&resolve(path));
            if canonicals.contains(path) || reached_by_canonical {
                log::warn!("Refusing to delete {}: it is a canonical copy", path.display());
                plan.protected.push(path.to_path_buf());
                continue;
            }
            plan.bytes += pair.duplicate.size;
            plan.targets.push(path.to_path_buf());
        }
        plan
    }

    /// Number of files that would be deleted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether there is nothing to delete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

// Fully resolved path, or the path itself when it cannot be resolved.
fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// Approves or rejects a deletion before anything is touched.
pub trait ConfirmationGate {
    /// Return `true` to proceed with deleting every target in `plan`.
    fn confirm(&self, plan: &DeletionPlan) -> bool;
}

/// Approves every plan. For non-interactive use with an explicit opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl ConfirmationGate for AssumeYes {
    fn confirm(&self, _plan: &DeletionPlan) -> bool {
        true
    }
}

/// Rejects every plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decline;

impl ConfirmationGate for Decline {
    fn confirm(&self, _plan: &DeletionPlan) -> bool {
        false
    }
}

impl<F> ConfirmationGate for F
where
    F: Fn(&DeletionPlan) -> bool,
{
    fn confirm(&self, plan: &DeletionPlan) -> bool {
        self(plan)
    }
}

/// Delete a single file to the system trash.
///
/// This is the safest deletion method - files can be recovered from trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = fs::metadata(path)
        .map_err(|e| DeleteError::from_io(path, e))?
        .len();

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
    Ok(DeleteResult::new(path.to_path_buf(), size, false))
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `PermanentDeleteFailed` if the delete operation fails
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = fs::metadata(path)
        .map_err(|e| DeleteError::from_io(path, e))?
        .len();

    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::PermanentDeleteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);
    Ok(DeleteResult::new(path.to_path_buf(), size, true))
}

/// Delete multiple files in batch.
///
/// Processes all files, continuing on error if configured to do so.
/// Callers are responsible for never passing a canonical path here;
/// [`delete_duplicates`] does that check.
pub fn delete_batch<C: DeleteProgressCallback>(
    paths: &[PathBuf],
    config: &DeleteConfig,
    callback: Option<&C>,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        if let Some(cb) = callback {
            cb.on_before_delete(path, index, total);
        }

        let delete_result = if config.permanent {
            permanent_delete(path)
        } else {
            delete_to_trash(path)
        };

        match delete_result {
            Ok(del) => {
                result.bytes_freed += del.size;
                if let Some(cb) = callback {
                    cb.on_delete_success(path, del.size);
                }
                result.successes.push(del);
            }
            Err(e) => {
                let error_msg = e.to_string();
                log::warn!("Failed to delete {}: {}", path.display(), error_msg);

                if let Some(cb) = callback {
                    cb.on_delete_failure(path, &error_msg);
                }

                result.failures.push((path.clone(), error_msg));

                if !config.continue_on_error {
                    log::info!("Stopping batch deletion due to error (continue_on_error=false)");
                    break;
                }
            }
        }
    }

    if let Some(cb) = callback {
        cb.on_complete(&result);
    }

    log::info!("{}", result.summary());
    result
}

/// Delete the duplicate member of each pair once `gate` approves.
///
/// Canonical paths are never deleted. Per-file failures are recorded in the
/// result and do not stop the batch (unless `continue_on_error` is off).
///
/// # Errors
///
/// [`DeleteError::NotConfirmed`] if the gate rejects the plan; nothing is
/// deleted in that case.
pub fn delete_duplicates<G, C>(
    pairs: &[DuplicatePair],
    config: &DeleteConfig,
    gate: &G,
    callback: Option<&C>,
) -> Result<BatchDeleteResult, DeleteError>
where
    G: ConfirmationGate + ?Sized,
    C: DeleteProgressCallback,
{
    let plan = DeletionPlan::from_pairs(pairs);
    if plan.is_empty() {
        log::info!("Nothing to delete");
        return Ok(BatchDeleteResult {
            protected: plan.protected,
            ..Default::default()
        });
    }

    if !gate.confirm(&plan) {
        log::info!("Deletion of {} file(s) not confirmed", plan.len());
        return Err(DeleteError::NotConfirmed { count: plan.len() });
    }

    log::info!(
        "Deleting {} duplicate(s) ({}){}",
        plan.len(),
        ByteSize(plan.bytes),
        if config.permanent { " permanently" } else { "" }
    );
    let mut result = delete_batch(&plan.targets, config, callback);
    result.protected = plan.protected;
    Ok(result)
}
