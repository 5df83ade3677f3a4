//! Progress reporting utilities using indicatif.
//!
//! The engine reports progress through the [`ProgressCallback`] trait. The
//! only required method is [`ProgressCallback::on_progress`], which receives
//! `(completed, total)` after every listed entry, so any
//! `Fn(usize, usize) + Send + Sync` closure is a valid sink.
//!
//! [`Progress`] is the terminal implementation used by the command-line
//! front end.

use std::fmt;
use std::path::Path;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

use crate::actions::{BatchDeleteResult, DeleteProgressCallback};

/// A stage of a run that reports progress independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Hashing the folders of a within- or across-folder scan
    Scan,
    /// Hashing the existing folder to build the membership index
    Index,
    /// Hashing the source folder and copying unique files
    Source,
}

impl Phase {
    /// Short machine-friendly name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Index => "index",
            Self::Source => "source",
        }
    }

    /// Human-readable description for progress bars.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Scan => "Hashing",
            Self::Index => "Indexing existing",
            Self::Source => "Checking source",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress sink for dedup runs.
///
/// Calls are synchronous and serialized by the engine: within a phase,
/// `completed` rises by exactly one per call from 1 to `total`.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - The phase being started
    /// * `total` - Number of entries the phase will report
    fn on_phase_start(&self, _phase: Phase, _total: usize) {}

    /// Called after each entry is processed.
    fn on_progress(&self, completed: usize, total: usize);

    /// Called when a phase completes.
    fn on_phase_end(&self, _phase: Phase) {}

    /// Called with a free-form status message.
    fn on_message(&self, _message: &str) {}
}

impl<F> ProgressCallback for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, completed: usize, total: usize) {
        self(completed, total);
    }
}

/// Progress reporter using indicatif.
///
/// Shows one bar per phase on stderr.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cleanset::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style(phase: Phase) -> ProgressStyle {
        let template = match phase {
            Phase::Index => {
                "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} (ETA: {eta})"
            }
            Phase::Scan | Phase::Source => {
                "[{elapsed_precise}] [{bar:40.green/blue}] {pos}/{len} ({percent}%) {msg} {per_sec} (ETA: {eta})"
            }
        };
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style(phase));
        pb.set_message(phase.label());
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_progress(&self, completed: usize, _total: usize) {
        if self.quiet {
            return;
        }
        self.with_bar(|pb| pb.set_position(completed as u64));
    }

    fn on_phase_end(&self, phase: Phase) {
        if self.quiet {
            return;
        }

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_with_message(format!("{} complete", phase.label()));
            }
        }
    }

    fn on_message(&self, message: &str) {
        if self.quiet {
            return;
        }
        let message = message.to_string();
        self.with_bar(|pb| pb.set_message(message));
    }
}

impl DeleteProgressCallback for Progress {
    fn on_before_delete(&self, _path: &Path, index: usize, total: usize) {
        if self.quiet || index > 0 {
            return;
        }
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.red/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█>-"),
        );
        pb.set_message("Deleting");
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_delete_success(&self, _path: &Path, _size: u64) {
        if !self.quiet {
            self.with_bar(|pb| pb.inc(1));
        }
    }

    fn on_delete_failure(&self, path: &Path, _error: &str) {
        if !self.quiet {
            let message = format!("failed: {}", path.display());
            self.with_bar(|pb| {
                pb.set_message(message);
                pb.inc(1);
            });
        }
    }

    fn on_complete(&self, _result: &BatchDeleteResult) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}
