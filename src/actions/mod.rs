//! File actions module.
//!
//! This module provides functionality for:
//! - Copying unique files into an output folder, keeping timestamps
//! - Safe deletion of duplicates via trash crate
//! - Permanent deletion (with confirmation)
//!
//! # Deletion
//!
//! Deletion is driven by duplicate pairs and gated:
//! - Only the duplicate half of a pair is deleted
//! - Move to system trash (default, recoverable)
//! - Permanent deletion (requires explicit configuration)
//! - Nothing happens until a [`ConfirmationGate`] approves the batch
//!
//! ```no_run
//! use cleanset::actions::delete::delete_to_trash;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/path/to/duplicate.png");
//! let result = delete_to_trash(&path);
//! ```

pub mod copy;
pub mod delete;

// Re-export commonly used types
pub use copy::{copy_with_times, CopyError};
pub use delete::{
    delete_batch, delete_duplicates, delete_to_trash, permanent_delete, AssumeYes,
    BatchDeleteResult, ConfirmationGate, Decline, DeleteConfig, DeleteError,
    DeleteProgressCallback, DeleteResult, DeletionPlan, NoDeleteProgress,
};
