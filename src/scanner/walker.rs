//! Single-level directory listing using walkdir.
//!
//! # Overview
//!
//! [`Walker`] lists the direct children of one folder as [`FileRecord`]s.
//! Subdirectories are reported but never descended into. Every child is
//! returned, including directories and dangling symlinks, so that callers
//! can count all entries toward progress; only [`EntryKind::File`] records
//! are hashing candidates.
//!
//! Symlinks are resolved once: a link to a regular file becomes a `File`
//! record with `is_symlink` set, a link to a directory becomes a
//! `Directory` record, and a link whose target cannot be read becomes a
//! `DanglingSymlink`.
//!
//! # Example
//!
//! ```no_run
//! use cleanset::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("./existing"), WalkerConfig::default())
//!     .with_label("existing", 0);
//! let records = walker.list().unwrap();
//! println!("{} entries", records.len());
//! ```

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::{EntryKind, EnumerationOrder, FileRecord, ScanError, WalkerConfig};

/// Lists the immediate children of a folder.
#[derive(Debug)]
pub struct Walker {
    /// Folder to list
    root: PathBuf,
    /// Listing options
    config: WalkerConfig,
    /// Role of the folder, copied into every record
    label: String,
    /// Position of the folder in argument order
    folder_index: usize,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given folder.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            label: String::new(),
            folder_index: 0,
            shutdown_flag: None,
        }
    }

    /// Label records with the folder's role and argument index.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>, folder_index: usize) -> Self {
        self.label = label.into();
        self.folder_index = folder_index;
        self
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set, listing stops early and returns what it has.
    /// The caller is expected to check the flag again afterwards.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// List the folder's direct children in the configured order.
    ///
    /// # Errors
    ///
    /// - [`ScanError::NotFound`] if the folder does not exist
    /// - [`ScanError::NotADirectory`] if the path is not a folder
    /// - [`ScanError::PermissionDenied`] if the folder cannot be read
    /// - [`ScanError::Io`] for other listing failures
    pub fn list(&self) -> Result<Vec<FileRecord>, ScanError> {
        let root_meta = fs::metadata(&self.root).map_err(|e| ScanError::from_io(&self.root, e))?;
        if !root_meta.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut walk = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.config.order == EnumerationOrder::Name {
            walk = walk.sort_by_file_name();
        }

        let mut records = Vec::new();
        for entry in walk {
            if self.is_shutdown_requested() {
                log::debug!("Walker: Shutdown requested, stopping listing of {}", self.root.display());
                break;
            }

            let entry = entry.map_err(|e| self.convert_walkdir_error(e))?;

            if self.config.skip_hidden && is_hidden(&entry) {
                log::trace!("Skipping hidden entry: {}", entry.path().display());
                continue;
            }

            let record = self.build_record(&entry, records.len());
            log::trace!("Listed {:?} {}", record.kind, record.path.display());
            records.push(record);
        }

        log::debug!(
            "Listed {} entries in {} ({})",
            records.len(),
            self.root.display(),
            if self.label.is_empty() { "unlabeled" } else { self.label.as_str() }
        );
        Ok(records)
    }

    fn build_record(&self, entry: &DirEntry, position: usize) -> FileRecord {
        let path = entry.path().to_path_buf();
        let is_symlink = entry.path_is_symlink();

        let metadata = if is_symlink {
            fs::metadata(&path).ok()
        } else {
            entry.metadata().ok()
        };

        let kind = match &metadata {
            Some(m) => kind_of(m),
            None if is_symlink => EntryKind::DanglingSymlink,
            None => EntryKind::Other,
        };

        let (size, modified) = match &metadata {
            Some(m) if m.is_file() => (m.len(), m.modified().ok()),
            _ => (0, None),
        };

        let mut record = FileRecord::new(path, size, modified)
            .with_origin(self.label.clone(), self.folder_index, position)
            .with_kind(kind);
        record.is_symlink = is_symlink;
        record
    }

    fn convert_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Listing error for {}: {}", path.display(), error);
        match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}

fn kind_of(metadata: &Metadata) -> EntryKind {
    if metadata.is_file() {
        EntryKind::File
    } else if metadata.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::Other
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
