//! Layered application configuration.
//!
//! Settings are merged with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory, or the file given
//!    with `--config`
//! 3. `CLEANSET_*` environment variables (e.g. `CLEANSET_IO_THREADS=8`)
//! 4. Command-line flags (applied by the caller)
//!
//! ```toml
//! io_threads = 8
//! order = "name"          # or "filesystem"
//! canonical = "first"     # or "oldest", "newest"
//! strict = false
//! read_timeout_secs = 30
//! permanent_delete = false
//! output_prefix = "clean_"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::duplicates::{CanonicalPolicy, EngineConfig, DEFAULT_IO_THREADS, DEFAULT_OUTPUT_PREFIX};
use crate::scanner::EnumerationOrder;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "CLEANSET_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hashing threads.
    pub io_threads: usize,
    /// Listing order within a folder.
    pub order: EnumerationOrder,
    /// Canonical selection policy.
    pub canonical: CanonicalPolicy,
    /// Abort on the first unreadable file.
    pub strict: bool,
    /// Skip dot-files.
    pub skip_hidden: bool,
    /// Per-file read timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,
    /// Delete permanently instead of moving to trash.
    pub permanent_delete: bool,
    /// Name prefix for copied unique files.
    pub output_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_threads: DEFAULT_IO_THREADS,
            order: EnumerationOrder::default(),
            canonical: CanonicalPolicy::default(),
            strict: false,
            skip_hidden: false,
            read_timeout_secs: None,
            permanent_delete: false,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Load from the default file location and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment variable is malformed.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an explicit file, falling back to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given but missing, or if any source is
    /// malformed, or if the merged values are invalid.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                if !p.is_file() {
                    bail!("Config file not found: {}", p.display());
                }
                Some(p.to_path_buf())
            }
            None => Self::config_path().filter(|p| p.is_file()),
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(ref file) = file {
            log::debug!("Loading config from {}", file.display());
            figment = figment.merge(Toml::file(file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: Self = figment.extract().context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no run can use.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.io_threads == 0 {
            bail!("io_threads must be at least 1");
        }
        if self.read_timeout_secs == Some(0) {
            bail!("read_timeout_secs must be at least 1");
        }
        if self.output_prefix.contains(['/', '\\']) {
            bail!("output_prefix must not contain path separators: {:?}", self.output_prefix);
        }
        Ok(())
    }

    /// Write the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "cleanset", "cleanset").map(|d| d.config_dir().join("config.toml"))
    }

    /// Read timeout as a duration.
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    /// Engine configuration carrying these settings.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        let mut engine = EngineConfig::default()
            .with_io_threads(self.io_threads)
            .with_strict(self.strict)
            .with_order(self.order)
            .with_skip_hidden(self.skip_hidden)
            .with_canonical(self.canonical)
            .with_output_prefix(self.output_prefix.clone());
        if let Some(timeout) = self.read_timeout() {
            engine = engine.with_read_timeout(timeout);
        }
        engine
    }
}
