//! Scanner module for directory listing and file hashing.
//!
//! This module provides functionality for:
//! - Single-level directory listing (no recursion into subdirectories)
//! - Content hashing with BLAKE3, streamed in bounded chunks
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory enumeration and candidate discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use cleanset::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("./incoming"), WalkerConfig::default());
//! for record in walker.list().unwrap() {
//!     println!("{} ({:?})", record.path.display(), record.kind);
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

// Re-export main types
pub use hasher::{hash_bytes, hash_to_hex, hex_to_hash, Hash, Hasher, CHUNK_SIZE};
pub use walker::Walker;

/// Kind of a directory entry as seen during enumeration.
///
/// Only [`EntryKind::File`] entries are candidates for hashing; everything
/// else is counted for progress and otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file (or a symlink that resolves to one).
    File,
    /// A directory (or a symlink that resolves to one).
    Directory,
    /// A symlink whose target does not exist or cannot be read.
    DanglingSymlink,
    /// Sockets, FIFOs, device nodes and anything else.
    Other,
}

/// A discovered directory entry.
///
/// Records are created during enumeration and never mutated afterwards.
/// Discovery order is `(folder_index, position)`: the argument order of the
/// folder first, then the listing order inside that folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path to the entry
    pub path: PathBuf,
    /// Role of the folder the entry was found in ("existing", "source", "folder 2", ...)
    pub origin: String,
    /// Index of that folder in argument order
    pub folder_index: usize,
    /// Position of the entry within its folder listing
    pub position: usize,
    /// What kind of entry this is
    pub kind: EntryKind,
    /// Whether the entry itself is a symbolic link
    pub is_symlink: bool,
    /// File size in bytes (0 when unknown)
    pub size: u64,
    /// Last modification time, when available
    pub modified: Option<SystemTime>,
}

impl FileRecord {
    /// Create a record for a regular file with no folder context.
    ///
    /// Mostly useful in tests and when feeding pre-collected paths to the
    /// engine.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: Option<SystemTime>) -> Self {
        Self {
            path,
            origin: String::new(),
            folder_index: 0,
            position: 0,
            kind: EntryKind::File,
            is_symlink: false,
            size,
            modified,
        }
    }

    /// Attach folder context to the record.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>, folder_index: usize, position: usize) -> Self {
        self.origin = origin.into();
        self.folder_index = folder_index;
        self.position = position;
        self
    }

    /// Set the entry kind.
    #[must_use]
    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this entry is a hashing candidate.
    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Discovery-order key used for deterministic tie-breaking.
    #[must_use]
    pub fn discovery_key(&self) -> (usize, usize) {
        (self.folder_index, self.position)
    }

    /// File name component, lossily converted for display.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Order in which the entries of one folder are listed.
///
/// Canonical selection depends on this order, so `Name` is the default:
/// raw directory-listing order differs between filesystems and platforms.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationOrder {
    /// Sort entries by file name (byte-wise)
    #[default]
    Name,
    /// Keep the order the operating system returns
    Filesystem,
}

/// Configuration for directory listing.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Listing order within a folder.
    pub order: EnumerationOrder,

    /// Skip hidden entries (names starting with `.`).
    /// Skipped entries are not enumerated at all and do not count toward progress.
    pub skip_hidden: bool,
}

impl WalkerConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(order: EnumerationOrder, skip_hidden: bool) -> Self {
        Self { order, skip_hidden }
    }
}

/// Errors that can occur while listing a directory.
///
/// These are fatal to an invocation and are raised before any hashing starts.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when reading the directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while reading the directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised for `path`.
    #[must_use]
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::NotADirectory(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file disappeared between enumeration and hashing.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Reading the file did not finish within the configured timeout.
    #[error("Read timed out after {}s: {path}", .after.as_secs_f64())]
    TimedOut {
        /// File being read
        path: PathBuf,
        /// Configured timeout
        after: Duration,
    },

    /// Hashing stopped because shutdown was requested.
    #[error("Hashing interrupted: {0}")]
    Interrupted(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Interrupted(p) => p,
            Self::TimedOut { path, .. } | Self::Io { path, .. } => path,
        }
    }
}
