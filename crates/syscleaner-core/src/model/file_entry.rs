//! Walk snapshots and the reports built from them.
//!
//! Everything here is a plain value produced once per operation and
//! discarded after the frontend prints it.

use std::path::PathBuf;

/// A single non-directory entry captured at walk time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path as produced by the walker (root-joined, not canonicalised).
    pub path: PathBuf,
    /// Logical size in bytes. For symlinks this is the size of the link itself.
    pub size: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Largest files under a directory, sorted descending by size.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// At most `top_n` entries, largest first.
    pub entries: Vec<FileEntry>,
    /// How many files exceeded the threshold before truncation.
    pub qualifying: usize,
    /// The exclusive size threshold the scan used.
    pub min_size: u64,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate junk usage of one configured root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootUsage {
    pub root: PathBuf,
    /// Sum of file sizes reached before the walk ended (possibly partial).
    pub bytes: u64,
    pub files: u64,
    /// Set when the root could not be walked at all or the walk was cut short.
    pub error: Option<String>,
}

/// Junk usage across every configured root, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct JunkReport {
    pub roots: Vec<RootUsage>,
}

impl JunkReport {
    pub fn total_bytes(&self) -> u64 {
        self.roots.iter().map(|r| r.bytes).sum()
    }

    pub fn total_files(&self) -> u64 {
        self.roots.iter().map(|r| r.files).sum()
    }

    /// `true` when there is nothing to clean.
    pub fn is_clean(&self) -> bool {
        self.total_bytes() == 0
    }
}

/// Outcome of deleting the files under one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootClean {
    pub root: PathBuf,
    pub removed: u64,
    pub bytes_freed: u64,
    /// Files that could not be removed; each one was logged.
    pub failed: u64,
    pub error: Option<String>,
}

/// Outcome of a cleaning pass across every configured root.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub roots: Vec<RootClean>,
}

impl CleanReport {
    pub fn removed(&self) -> u64 {
        self.roots.iter().map(|r| r.removed).sum()
    }

    pub fn bytes_freed(&self) -> u64 {
        self.roots.iter().map(|r| r.bytes_freed).sum()
    }

    pub fn failed(&self) -> u64 {
        self.roots.iter().map(|r| r.failed).sum()
    }
}
