//! Dedup engine: enumeration, hashing and the three operating modes.
//!
//! # Overview
//!
//! Every mode is built on one primitive, [`DedupEngine::group_by_identity`]:
//!
//! 1. Non-regular entries (directories, dangling symlinks, special files)
//!    are skipped; they still count toward progress.
//! 2. Each regular file is hashed with BLAKE3. Hashing may run on a bounded
//!    rayon pool, but results are consumed in listing order and progress is
//!    reported once per entry, so `completed` rises strictly from 1 to total.
//! 3. Records are inserted into an [`IdentityIndex`] keyed by content hash.
//!
//! The modes:
//!
//! - **Within a folder** ([`DedupEngine::dedup_within_folder`]): one listing,
//!   grouped, then every non-canonical member of every group is reported.
//! - **Across folders** ([`DedupEngine::dedup_across_folders`]): listings are
//!   concatenated in argument order before grouping, so the copy found in the
//!   earliest folder is canonical.
//! - **Copy uniques** ([`DedupEngine::copy_uniques`]): the `existing` folder
//!   is indexed, then each `source` file is either reported as a duplicate of
//!   an existing file or copied into the output folder as `clean_<N><.ext>`.
//!
//! All folders of a run are listed before any hashing starts, so a missing
//! or unreadable folder fails the run up front.
//!
//! # Example
//!
//! ```no_run
//! use cleanset::duplicates::{DedupEngine, EngineConfig};
//! use std::path::PathBuf;
//!
//! let engine = DedupEngine::new(EngineConfig::default().with_io_threads(4));
//! let report = engine
//!     .dedup_across_folders(&[PathBuf::from("dataset_a"), PathBuf::from("dataset_b")])
//!     .unwrap();
//!
//! for pair in &report.pairs {
//!     println!("{} duplicates {}", pair.duplicate.path.display(), pair.canonical.path.display());
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;

use super::groups::{CanonicalPolicy, DuplicatePair, IdentityIndex, ScanSummary};
use crate::actions::copy::copy_with_times;
use crate::progress::{Phase, ProgressCallback};
use crate::scanner::{
    EnumerationOrder, FileRecord, Hash, HashError, Hasher, ScanError, Walker, WalkerConfig,
};

/// Default file-name prefix for files copied by [`DedupEngine::copy_uniques`].
pub const DEFAULT_OUTPUT_PREFIX: &str = "clean_";

/// Default number of hashing threads.
pub const DEFAULT_IO_THREADS: usize = 4;

/// Entries hashed per parallel batch before results are consumed in order.
const HASH_BATCH_SIZE: usize = 64;

/// Files above this size get a debug log line when hashed.
const LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Configuration for the dedup engine.
#[derive(Clone)]
pub struct EngineConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing; 1 hashes sequentially.
    pub io_threads: usize,
    /// Abort on the first file that cannot be hashed.
    pub strict: bool,
    /// Listing options applied to every folder.
    pub walker_config: WalkerConfig,
    /// Rule for choosing the canonical member of a group.
    pub canonical: CanonicalPolicy,
    /// Per-file read timeout.
    pub read_timeout: Option<Duration>,
    /// File-name prefix for copied uniques.
    pub output_prefix: String,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("io_threads", &self.io_threads)
            .field("strict", &self.strict)
            .field("walker_config", &self.walker_config)
            .field("canonical", &self.canonical)
            .field("read_timeout", &self.read_timeout)
            .field("output_prefix", &self.output_prefix)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            io_threads: DEFAULT_IO_THREADS,
            strict: false,
            walker_config: WalkerConfig::default(),
            canonical: CanonicalPolicy::default(),
            read_timeout: None,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl EngineConfig {
    /// Set the number of hashing threads (at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set fail-fast on the first hash failure.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the listing order within each folder.
    #[must_use]
    pub fn with_order(mut self, order: EnumerationOrder) -> Self {
        self.walker_config.order = order;
        self
    }

    /// Skip entries whose names start with a dot.
    #[must_use]
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.walker_config.skip_hidden = skip;
        self
    }

    /// Set the canonical selection policy.
    #[must_use]
    pub fn with_canonical(mut self, policy: CanonicalPolicy) -> Self {
        self.canonical = policy;
        self
    }

    /// Bound the time spent reading any single file.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the file-name prefix for copied uniques.
    #[must_use]
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// A per-file problem that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    /// File or folder concerned
    pub path: PathBuf,
    /// What went wrong
    pub message: String,
}

impl ScanWarning {
    fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Output of [`DedupEngine::group_by_identity`].
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Hashed records grouped by content
    pub index: IdentityIndex,
    /// Files that could not be hashed
    pub warnings: Vec<ScanWarning>,
    /// Entry and hashing counters
    pub summary: ScanSummary,
}

/// Result of a within-folder or across-folder run.
#[derive(Debug, Clone, Default)]
pub struct DedupReport {
    /// Duplicate pairs, in group first-appearance order
    pub pairs: Vec<DuplicatePair>,
    /// Skipped files and folders
    pub warnings: Vec<ScanWarning>,
    /// Run counters
    pub summary: ScanSummary,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// A source file copied into the output folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    /// Original location
    pub source: PathBuf,
    /// New location inside the output folder
    pub destination: PathBuf,
    /// Content identity
    pub hash: Hash,
    /// Bytes copied
    pub size: u64,
}

/// Result of a copy-uniques run.
#[derive(Debug, Clone, Default)]
pub struct CopyReport {
    /// Number of files copied into the output folder
    pub copied: usize,
    /// Details of every copy, in source listing order
    pub copied_files: Vec<CopiedFile>,
    /// Source files already present in the existing folder
    pub pairs: Vec<DuplicatePair>,
    /// Files that could not be hashed
    pub warnings: Vec<ScanWarning>,
    /// Unique source files that could not be copied
    pub copy_failures: Vec<ScanWarning>,
    /// Counters over both folders
    pub summary: ScanSummary,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// Errors that stop a run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The run was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// A folder could not be listed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A file could not be hashed and strict mode is on.
    #[error("Aborting on unreadable file: {0}")]
    Hash(#[source] HashError),

    /// The output folder is one of the input folders.
    #[error("Output folder {output} is the same as input folder {folder}")]
    OutputOverlap {
        /// Requested output folder
        output: PathBuf,
        /// Input folder it resolves to
        folder: PathBuf,
    },

    /// An I/O error occurred with a specific path.
    #[error("I/O error for {path}: {source}")]
    IoWithPath {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one listed entry.
#[derive(Debug)]
enum HashOutcome {
    /// Not a regular file
    Skipped,
    /// Hashed successfully
    Hashed(Hash),
    /// Could not be hashed
    Failed(HashError),
}

/// Orchestrates listing, hashing and grouping.
///
/// Holds no state between runs apart from its configuration and thread pool.
pub struct DedupEngine {
    config: EngineConfig,
    hasher: Hasher,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for DedupEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DedupEngine")
            .field("config", &self.config)
            .field("parallel", &self.pool.is_some())
            .finish()
    }
}

impl DedupEngine {
    /// Create an engine with the given configuration.
    ///
    /// With `io_threads > 1` a dedicated rayon pool is built; if that fails,
    /// hashing falls back to the calling thread.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(timeout) = config.read_timeout {
            hasher = hasher.with_read_timeout(timeout);
        }
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(Arc::clone(flag));
        }

        let pool = if config.io_threads > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(config.io_threads)
                .thread_name(|i| format!("cleanset-hash-{i}"))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    log::warn!("Failed to create hashing thread pool ({}), hashing sequentially", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            config,
            hasher,
            pool,
        }
    }

    /// Create an engine with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn is_shutdown_requested(&self) -> bool {
        self.config
            .shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    fn check_shutdown(&self) -> Result<(), FinderError> {
        if self.is_shutdown_requested() {
            log::info!("Shutdown requested, stopping");
            Err(FinderError::Interrupted)
        } else {
            Ok(())
        }
    }

    /// List one folder's direct children.
    ///
    /// # Errors
    ///
    /// [`FinderError::Scan`] if the folder cannot be listed, or
    /// [`FinderError::Interrupted`] if shutdown was requested.
    pub fn enumerate(
        &self,
        folder: &Path,
        label: &str,
        folder_index: usize,
    ) -> Result<Vec<FileRecord>, FinderError> {
        let mut walker =
            Walker::new(folder, self.config.walker_config.clone()).with_label(label, folder_index);
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        let records = walker.list()?;
        self.check_shutdown()?;
        log::info!("Listed {} entries in {} ({})", records.len(), folder.display(), label);
        Ok(records)
    }

    fn hash_one(&self, record: &FileRecord) -> HashOutcome {
        if !record.is_regular() {
            log::trace!("Skipping non-regular entry: {}", record.path.display());
            return HashOutcome::Skipped;
        }
        if self.is_shutdown_requested() {
            return HashOutcome::Failed(HashError::Interrupted(record.path.clone()));
        }
        if record.size > LARGE_FILE_THRESHOLD {
            log::debug!(
                "Hashing large file ({} MB): {}",
                record.size / (1024 * 1024),
                record.path.display()
            );
        }

        match self.hasher.full_hash(&record.path) {
            Ok(hash) => HashOutcome::Hashed(hash),
            Err(e) => HashOutcome::Failed(e),
        }
    }

    /// Hash every record and hand each outcome to `visit` in listing order.
    ///
    /// Progress is reported after `visit` returns for each entry.
    fn hash_each<F>(
        &self,
        records: &[FileRecord],
        phase: Phase,
        mut visit: F,
    ) -> Result<ScanSummary, FinderError>
    where
        F: FnMut(&FileRecord, HashOutcome) -> Result<(), FinderError>,
    {
        let total = records.len();
        let mut summary = ScanSummary {
            total_entries: total,
            ..Default::default()
        };

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(phase, total);
        }
        log::info!("Phase {}: hashing {} entries", phase, total);

        let mut completed = 0;
        for batch in records.chunks(HASH_BATCH_SIZE) {
            self.check_shutdown()?;

            let outcomes: Vec<HashOutcome> = match self.pool {
                Some(ref pool) => {
                    pool.install(|| batch.par_iter().map(|r| self.hash_one(r)).collect())
                }
                None => batch.iter().map(|r| self.hash_one(r)).collect(),
            };

            for (record, outcome) in batch.iter().zip(outcomes) {
                match outcome {
                    HashOutcome::Failed(HashError::Interrupted(_)) => {
                        return Err(FinderError::Interrupted)
                    }
                    HashOutcome::Skipped => summary.skipped_entries += 1,
                    HashOutcome::Hashed(_) => {
                        summary.candidates += 1;
                        summary.hashed += 1;
                    }
                    HashOutcome::Failed(_) => {
                        summary.candidates += 1;
                        summary.failed += 1;
                    }
                }
                visit(record, outcome)?;

                completed += 1;
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_progress(completed, total);
                }
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(phase);
        }
        log::debug!(
            "Phase {} complete: {} hashed, {} failed, {} skipped",
            phase,
            summary.hashed,
            summary.failed,
            summary.skipped_entries
        );
        Ok(summary)
    }

    /// Apply the hash-failure policy: warn and continue, or abort in strict mode.
    fn handle_failure(
        &self,
        error: HashError,
        warnings: &mut Vec<ScanWarning>,
    ) -> Result<(), FinderError> {
        if self.config.strict {
            log::error!("Strict mode: {}", error);
            return Err(FinderError::Hash(error));
        }
        log::warn!("Skipping unreadable file: {}", error);
        warnings.push(ScanWarning::new(error.path(), error.to_string()));
        Ok(())
    }

    /// Hash `records` and group them by content identity.
    ///
    /// Records are inserted in the order given. Files that cannot be hashed
    /// are left out of the index and listed in the returned warnings.
    ///
    /// # Errors
    ///
    /// [`FinderError::Interrupted`] on shutdown, or [`FinderError::Hash`]
    /// for the first unreadable file when strict mode is on.
    pub fn group_by_identity(
        &self,
        records: &[FileRecord],
        phase: Phase,
    ) -> Result<Grouping, FinderError> {
        let mut index = IdentityIndex::new();
        let mut warnings = Vec::new();

        let mut summary = self.hash_each(records, phase, |record, outcome| {
            match outcome {
                HashOutcome::Hashed(hash) => index.insert(hash, record.clone()),
                HashOutcome::Failed(e) => self.handle_failure(e, &mut warnings)?,
                HashOutcome::Skipped => {}
            }
            Ok(())
        })?;

        summary.record_index(&index);
        Ok(Grouping {
            index,
            warnings,
            summary,
        })
    }

    /// Find duplicates among the direct children of one folder.
    ///
    /// # Errors
    ///
    /// See [`DedupEngine::dedup_across_folders`].
    pub fn dedup_within_folder(&self, folder: &Path) -> Result<DedupReport, FinderError> {
        let start = Instant::now();
        log::info!("Finding duplicates within {}", folder.display());

        let records = self.enumerate(folder, "folder", 0)?;
        self.report_from(records, Vec::new(), start)
    }

    /// Find duplicates across several folders.
    ///
    /// The copy in the earliest folder (argument order) is canonical under
    /// the default policy. A folder named twice is scanned once.
    ///
    /// # Errors
    ///
    /// - [`FinderError::Scan`] if any folder cannot be listed (before hashing)
    /// - [`FinderError::Interrupted`] on shutdown
    /// - [`FinderError::Hash`] on an unreadable file in strict mode
    pub fn dedup_across_folders(&self, folders: &[PathBuf]) -> Result<DedupReport, FinderError> {
        let start = Instant::now();
        log::info!("Finding duplicates across {} folder(s)", folders.len());

        let mut warnings = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut records = Vec::new();

        for (i, folder) in folders.iter().enumerate() {
            let resolved =
                fs::canonicalize(folder).map_err(|e| ScanError::from_io(folder, e))?;
            if !seen.insert(resolved) {
                log::warn!("Folder given more than once, scanning it once: {}", folder.display());
                warnings.push(ScanWarning::new(folder, "folder given more than once; skipped"));
                continue;
            }
            records.extend(self.enumerate(folder, &format!("folder {}", i + 1), i)?);
        }

        self.report_from(records, warnings, start)
    }

    fn report_from(
        &self,
        records: Vec<FileRecord>,
        mut warnings: Vec<ScanWarning>,
        start: Instant,
    ) -> Result<DedupReport, FinderError> {
        let grouping = self.group_by_identity(&records, Phase::Scan)?;
        let pairs = grouping.index.duplicate_pairs(self.config.canonical);
        warnings.extend(grouping.warnings);

        log::info!(
            "Found {} duplicate(s) in {} group(s) among {} file(s)",
            pairs.len(),
            grouping.summary.duplicate_groups,
            grouping.summary.hashed
        );

        Ok(DedupReport {
            pairs,
            warnings,
            summary: grouping.summary,
            duration: start.elapsed(),
        })
    }

    /// Copy files from `source` whose content is not in `existing` into `output`.
    ///
    /// Copies are named `<prefix><N><.ext>`, N counting successful copies from
    /// 1. Files already present in `existing` are reported as pairs instead.
    /// Identical files within `source` are each copied. The output folder is
    /// created if missing. A name that is already taken in `output` is never
    /// overwritten; N moves on to the next free name instead.
    ///
    /// # Errors
    ///
    /// - [`FinderError::Scan`] if `source` or `existing` cannot be listed
    /// - [`FinderError::OutputOverlap`] if `output` is `source` or `existing`
    /// - [`FinderError::IoWithPath`] if `output` cannot be created
    /// - [`FinderError::Interrupted`] on shutdown
    /// - [`FinderError::Hash`] on an unreadable file in strict mode
    pub fn copy_uniques(
        &self,
        source: &Path,
        existing: &Path,
        output: &Path,
    ) -> Result<CopyReport, FinderError> {
        let start = Instant::now();
        log::info!(
            "Copying files from {} not present in {} into {}",
            source.display(),
            existing.display(),
            output.display()
        );

        let existing_records = self.enumerate(existing, "existing", 0)?;
        let source_records = self.enumerate(source, "source", 1)?;
        reject_overlap(output, &[source, existing])?;

        fs::create_dir_all(output).map_err(|e| FinderError::IoWithPath {
            path: output.to_path_buf(),
            source: e,
        })?;

        let mut report = CopyReport::default();
        let mut next_index = 1;

        // Later files with the same content replace earlier ones.
        let mut known: HashMap<Hash, FileRecord> = HashMap::new();
        let mut warnings = Vec::new();
        let index_summary = self.hash_each(&existing_records, Phase::Index, |record, outcome| {
            match outcome {
                HashOutcome::Hashed(hash) => {
                    known.insert(hash, record.clone());
                }
                HashOutcome::Failed(e) => self.handle_failure(e, &mut warnings)?,
                HashOutcome::Skipped => {}
            }
            Ok(())
        })?;
        log::info!("Indexed {} distinct file(s) from {}", known.len(), existing.display());

        let source_summary = self.hash_each(&source_records, Phase::Source, |record, outcome| {
            match outcome {
                HashOutcome::Hashed(hash) => {
                    if let Some(matched) = known.get(&hash) {
                        log::debug!(
                            "{} already present as {}",
                            record.path.display(),
                            matched.path.display()
                        );
                        report.pairs.push(DuplicatePair {
                            duplicate: record.clone(),
                            canonical: matched.clone(),
                            hash,
                        });
                    } else {
                        self.copy_unique(record, hash, output, &mut next_index, &mut report);
                    }
                }
                HashOutcome::Failed(e) => self.handle_failure(e, &mut warnings)?,
                HashOutcome::Skipped => {}
            }
            Ok(())
        })?;

        report.summary.absorb(&index_summary);
        report.summary.absorb(&source_summary);
        report.summary.unique_identities = known.len();
        report.summary.duplicate_files = report.pairs.len();
        report.summary.wasted_bytes = report.pairs.iter().map(DuplicatePair::size).sum();
        report.summary.duplicate_groups = report
            .pairs
            .iter()
            .map(|p| p.hash)
            .collect::<HashSet<_>>()
            .len();
        warnings.append(&mut report.warnings);
        report.warnings = warnings;
        report.duration = start.elapsed();

        log::info!(
            "Copied {} file(s), {} already present, {} copy failure(s)",
            report.copied,
            report.pairs.len(),
            report.copy_failures.len()
        );
        Ok(report)
    }

    fn copy_unique(
        &self,
        record: &FileRecord,
        hash: Hash,
        output: &Path,
        next_index: &mut usize,
        report: &mut CopyReport,
    ) {
        let prefix = &self.config.output_prefix;
        let mut destination = output.join(output_name(prefix, *next_index, &record.path));
        // symlink_metadata so a dangling link also counts as taken
        while fs::symlink_metadata(&destination).is_ok() {
            log::debug!("{} already exists, trying the next name", destination.display());
            *next_index += 1;
            destination = output.join(output_name(prefix, *next_index, &record.path));
        }

        match copy_with_times(&record.path, &destination) {
            Ok(bytes) => {
                *next_index += 1;
                report.copied += 1;
                report.copied_files.push(CopiedFile {
                    source: record.path.clone(),
                    destination,
                    hash,
                    size: bytes,
                });
            }
            Err(e) => {
                log::warn!("Copy failed: {}", e);
                report
                    .copy_failures
                    .push(ScanWarning::new(&record.path, e.to_string()));
            }
        }
    }
}

/// Output file name for the `n`th copied file, keeping the source extension
/// byte for byte.
#[must_use]
pub fn output_name(prefix: &str, n: usize, source: &Path) -> OsString {
    let mut name = OsString::from(format!("{prefix}{n}"));
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

// Refuse an output folder that resolves to one of the inputs.
fn reject_overlap(output: &Path, inputs: &[&Path]) -> Result<(), FinderError> {
    let Ok(resolved) = fs::canonicalize(output) else {
        // Not created yet, so it cannot be an existing input folder.
        return Ok(());
    };
    for folder in inputs {
        if fs::canonicalize(folder).is_ok_and(|f| f == resolved) {
            return Err(FinderError::OutputOverlap {
                output: output.to_path_buf(),
                folder: folder.to_path_buf(),
            });
        }
    }
    Ok(())
}
