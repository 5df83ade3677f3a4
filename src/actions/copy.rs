//! Copying unique files into an output folder.
//!
//! [`copy_with_times`] copies content and permission bits, then carries the
//! source's access and modification times over to the copy. Timestamp
//! preservation is best effort: a failure there is logged and the copy still
//! counts as successful.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use thiserror::Error;

/// Error type for copy operations.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The source file vanished before it could be copied.
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    /// The source could not be read or the destination could not be written.
    #[error("permission denied copying {from} to {to}")]
    PermissionDenied {
        /// File being copied
        from: PathBuf,
        /// Destination path
        to: PathBuf,
    },

    /// Any other I/O failure.
    #[error("copy of {from} to {to} failed: {source}")]
    Io {
        /// File being copied
        from: PathBuf,
        /// Destination path
        to: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    fn from_io(from: &Path, to: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound if !from.exists() => Self::SourceNotFound(from.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            },
            _ => Self::Io {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: err,
            },
        }
    }

    /// Source path of the failed copy.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        match self {
            Self::SourceNotFound(p) => p,
            Self::PermissionDenied { from, .. } | Self::Io { from, .. } => from,
        }
    }
}

/// Copy `src` to `dst`, overwriting `dst` if it exists.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns [`CopyError`] if the content could not be copied. Failing to
/// restore timestamps is not an error.
pub fn copy_with_times(src: &Path, dst: &Path) -> Result<u64, CopyError> {
    let bytes = fs::copy(src, dst).map_err(|e| CopyError::from_io(src, dst, e))?;

    match fs::metadata(src) {
        Ok(meta) => {
            let atime = FileTime::from_last_access_time(&meta);
            let mtime = FileTime::from_last_modification_time(&meta);
            if let Err(e) = filetime::set_file_times(dst, atime, mtime) {
                log::warn!("Could not preserve timestamps on {}: {}", dst.display(), e);
            }
        }
        Err(e) => log::warn!("Could not read timestamps of {}: {}", src.display(), e),
    }

    log::trace!("Copied {} -> {} ({} bytes)", src.display(), dst.display(), bytes);
    Ok(bytes)
}
