//! Configuration, read once from a TOML file at startup.
//!
//! ```toml
//! cleanup_paths = ["~/.cache/thumbnails", "/tmp/syscleaner-junk"]
//! max_file_size = 104857600
//! top_files = 10
//! log_file = "syscleaner.log"
//! monitor_seconds = 10
//! monitor_interval_ms = 2000
//! ```
//!
//! Every field is optional. The resulting [`Config`] is immutable and is
//! passed by reference into the session; nothing reads it globally.

use crate::error::ConfigError;
use crate::monitor::MonitorSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "syscleaner.toml";

/// 100 MB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const DEFAULT_TOP_FILES: usize = 10;
pub const DEFAULT_LOG_FILE: &str = "syscleaner.log";
pub const DEFAULT_MONITOR_SECONDS: u64 = 10;
pub const DEFAULT_MONITOR_INTERVAL_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Roots whose files are junk. `~` expands to the home directory.
    pub cleanup_paths: Vec<PathBuf>,
    /// Large-file threshold in bytes (exclusive).
    pub max_file_size: u64,
    /// How many large files to list.
    pub top_files: usize,
    /// Append-mode log destination.
    pub log_file: PathBuf,
    /// How long the live monitor runs; 0 disables it.
    pub monitor_seconds: u64,
    pub monitor_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cleanup_paths: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            top_files: DEFAULT_TOP_FILES,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            monitor_seconds: DEFAULT_MONITOR_SECONDS,
            monitor_interval_ms: DEFAULT_MONITOR_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Read, parse, expand and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        debug!(
            "Loaded {} with {} cleanup paths",
            path.display(),
            config.cleanup_paths.len()
        );
        Ok(config)
    }

    /// Parse TOML text. Used by [`load`](Self::load) and by tests.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.cleanup_paths = config.cleanup_paths.iter().map(|p| expand_home(p)).collect();
        config.log_file = expand_home(&config.log_file);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "monitor_interval_ms must be greater than 0".into(),
            ));
        }
        if self.log_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("log_file must not be empty".into()));
        }
        Ok(())
    }

    /// Monitor timing, or `None` when the monitor is disabled.
    pub fn monitor_settings(&self) -> Option<MonitorSettings> {
        (self.monitor_seconds > 0).then(|| MonitorSettings {
            interval: Duration::from_millis(self.monitor_interval_ms),
            run_for: Some(Duration::from_secs(self.monitor_seconds)),
        })
    }
}

/// Replace a leading `~` with the user's home directory.
///
/// Paths without a leading `~`, and all paths when no home directory is
/// known, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
