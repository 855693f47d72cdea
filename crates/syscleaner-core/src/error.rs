//! Error types for the core crate.
//!
//! Per-entry walk failures never show up here: they are logged through the
//! [`LogSink`](crate::sink::LogSink) and the walk continues. These types cover
//! failures that the immediate caller has to decide about.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// The walk could not start at all.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("cannot open {}: {source}", .path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            WalkError::RootUnavailable { path, .. } => path,
        }
    }

    /// `true` when the root simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            WalkError::RootUnavailable { source, .. } => source.kind() == io::ErrorKind::NotFound,
        }
    }
}

/// Large-file scan failures. No partial result accompanies either variant.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("scan of {} was interrupted", .path.display())]
    Cancelled { path: PathBuf },
    #[error("failed to start progress indicator: {0}")]
    Indicator(#[source] io::Error),
}

/// Memory reclamation failures. Always reported, never fatal.
#[derive(Debug, Error)]
pub enum ReclaimError {
    #[error("unsupported operating system: {os}")]
    Unsupported { os: String },
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Configuration could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A metrics sample could not be taken. Logged; the monitor keeps polling.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{0} information unavailable")]
    Unavailable(&'static str),
}
