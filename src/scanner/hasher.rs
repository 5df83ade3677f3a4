//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! [`Hasher`] computes a 256-bit BLAKE3 digest over the full content of a
//! file. Content is streamed in [`CHUNK_SIZE`] reads so memory use stays
//! bounded regardless of file size. The digest depends only on the bytes:
//! name, timestamps and permissions never influence it.
//!
//! A read timeout can be configured to bound the latency of a single file on
//! unresponsive storage, and a shutdown flag aborts a read between chunks.
//!
//! # Example
//!
//! ```no_run
//! use cleanset::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let hash = hasher.full_hash(Path::new("image.png")).unwrap();
//! println!("{}", hash_to_hex(&hash));
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use super::HashError;

/// A 256-bit content identity.
pub type Hash = [u8; 32];

/// Size of each read while streaming a file into the digest.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Streaming BLAKE3 file hasher.
///
/// Cheap to clone; holds only configuration.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    read_timeout: Option<Duration>,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Hasher {
    /// Create a hasher with no timeout and no shutdown flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the time spent reading a single file.
    ///
    /// When set, each file is read on a helper thread and abandoned with
    /// [`HashError::TimedOut`] if it does not finish in time.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the shutdown flag checked between chunks.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Configured read timeout, if any.
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Compute the BLAKE3 digest of the full file content.
    ///
    /// # Errors
    ///
    /// - [`HashError::NotFound`] if the file no longer exists
    /// - [`HashError::PermissionDenied`] if it cannot be opened
    /// - [`HashError::TimedOut`] if the read timeout expires
    /// - [`HashError::Interrupted`] if shutdown was requested mid-read
    /// - [`HashError::Io`] for any other read failure
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        match self.read_timeout {
            Some(timeout) => self.full_hash_with_timeout(path, timeout),
            None => hash_file(path, self.shutdown_flag.as_deref()),
        }
    }

    fn full_hash_with_timeout(&self, path: &Path, timeout: Duration) -> Result<Hash, HashError> {
        let (tx, rx) = mpsc::channel();
        let owned: PathBuf = path.to_path_buf();
        let flag = self.shutdown_flag.clone();

        thread::Builder::new()
            .name("cleanset-read".to_string())
            .spawn(move || {
                // The receiver may be gone after a timeout; nothing to report then.
                let _ = tx.send(hash_file(&owned, flag.as_deref()));
            })
            .map_err(|e| HashError::from_io(path, e))?;

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                log::warn!(
                    "Read of {} did not finish within {:?}, skipping",
                    path.display(),
                    timeout
                );
                Err(HashError::TimedOut {
                    path: path.to_path_buf(),
                    after: timeout,
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(HashError::Io {
                path: path.to_path_buf(),
                source: io::Error::other("reader thread exited without a result"),
            }),
        }
    }
}

fn hash_file(path: &Path, shutdown: Option<&AtomicBool>) -> Result<Hash, HashError> {
    let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        if shutdown.is_some_and(|f| f.load(Ordering::SeqCst)) {
            return Err(HashError::Interrupted(path.to_path_buf()));
        }

        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HashError::from_io(path, e)),
        };
        hasher.update(&buffer[..n]);
    }

    log::trace!("Hashed {}", path.display());
    Ok(*hasher.finalize().as_bytes())
}

/// Digest of an in-memory byte slice, identical to hashing a file with the same content.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Render a hash as 64 lowercase hex characters.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse 64 hex characters back into a hash.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Hash> {
    if hex.len() != 64 || !hex.is_ascii() {
        return None;
    }

    let mut hash = [0u8; 32];
    for (i, byte) in hash.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(hash)
}
