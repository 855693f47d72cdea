//! Junk reporting and removal over the configured cleanup roots.
//!
//! Both operations are resilient to partial failure: one unreadable root or
//! one undeletable file is logged and the rest of the work still happens.
//! Neither ever returns an error; problems are recorded on the per-root
//! entries of the returned report.

use crate::model::{CleanReport, JunkReport, RootClean, RootUsage};
use crate::walker::DirectoryWalker;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Sums file sizes under each configured root.
pub struct JunkSizeReporter {
    walker: DirectoryWalker,
}

impl JunkSizeReporter {
    pub fn new(walker: DirectoryWalker) -> Self {
        Self { walker }
    }

    /// Report junk usage for every root, in the order given.
    ///
    /// A root that cannot be opened contributes 0 bytes and carries the
    /// error; an interrupted walk contributes the partial sum reached so far.
    pub fn usage(&self, roots: &[PathBuf]) -> JunkReport {
        let mut report = JunkReport::default();

        for root in roots {
            let mut usage = RootUsage {
                root: root.clone(),
                bytes: 0,
                files: 0,
                error: None,
            };

            match self.walker.walk(root) {
                Ok(mut walk) => {
                    for entry in walk.by_ref() {
                        usage.bytes += entry.size;
                        usage.files += 1;
                    }
                    if walk.was_cancelled() {
                        usage.error = Some("interrupted".to_owned());
                    }
                    debug!(
                        "{}: {} bytes in {} files ({} errors)",
                        root.display(),
                        usage.bytes,
                        usage.files,
                        walk.error_count()
                    );
                }
                Err(err) => {
                    self.walker
                        .sink()
                        .log(&format!("Error scanning directory {}: {err}", root.display()));
                    usage.error = Some(err.to_string());
                }
            }

            report.roots.push(usage);
            if self.walker.cancel_token().is_cancelled() {
                break;
            }
        }

        info!(
            "Junk usage: {} bytes in {} files across {} roots",
            report.total_bytes(),
            report.total_files(),
            report.roots.len()
        );
        report
    }
}

/// Deletes every non-directory entry under each configured root.
///
/// Directories are left in place, so a cleaned root keeps its empty
/// directory skeleton. Deletion is best-effort and has no rollback.
pub struct JunkRemover {
    walker: DirectoryWalker,
}

impl JunkRemover {
    pub fn new(walker: DirectoryWalker) -> Self {
        Self { walker }
    }

    /// Delete the files under every root, in the order given.
    pub fn clean(&self, roots: &[PathBuf]) -> CleanReport {
        let sink = self.walker.sink();
        let mut report = CleanReport::default();

        for root in roots {
            let mut outcome = RootClean {
                root: root.clone(),
                ..RootClean::default()
            };

            match self.walker.walk(root) {
                Ok(mut walk) => {
                    for entry in walk.by_ref() {
                        match fs::remove_file(&entry.path) {
                            Ok(()) => {
                                outcome.removed += 1;
                                outcome.bytes_freed += entry.size;
                            }
                            Err(err) => {
                                outcome.failed += 1;
                                sink.log(&format!(
                                    "Error removing file {}: {err}",
                                    entry.path.display()
                                ));
                            }
                        }
                    }
                    if walk.was_cancelled() {
                        outcome.error = Some("interrupted".to_owned());
                    }
                }
                Err(err) if err.is_not_found() => {
                    sink.log(&format!(
                        "Cleanup root {} not found, skipping",
                        root.display()
                    ));
                    outcome.error = Some("not found".to_owned());
                }
                Err(err) => {
                    sink.log(&format!("Error cleaning directory {}: {err}", root.display()));
                    outcome.error = Some(err.to_string());
                }
            }

            debug!(
                "{}: removed {} files ({} bytes), {} failures",
                root.display(),
                outcome.removed,
                outcome.bytes_freed,
                outcome.failed
            );
            report.roots.push(outcome);
            if self.walker.cancel_token().is_cancelled() {
                break;
            }
        }

        info!(
            "Cleanup removed {} files, freed {} bytes, {} failures",
            report.removed(),
            report.bytes_freed(),
            report.failed()
        );
        report
    }
}
