//! Recursive directory walker built on `jwalk`.
//!
//! The walker turns a root path into a lazy stream of [`FileEntry`] values.
//! It is shared by the junk reporter, the junk remover and the large-file
//! scanner, so all three agree on what counts as a file.
//!
//! # Error handling
//!
//! - The root itself must be stat-able (and listable, when it is a
//!   directory), otherwise [`DirectoryWalker::walk`] returns
//!   [`WalkError::RootUnavailable`] and nothing is walked.
//! - Every other failure (permission denied on a subdirectory, a broken
//!   symlink, a file deleted between listing and stat) is reported to the
//!   [`LogSink`], counted, and skipped. Siblings are still visited.
//!
//! # Symlinks
//!
//! Symlinks are never followed. A symlink is yielded as a leaf entry sized by
//! its own `lstat`, and a symlink pointing at a directory is never descended.
//! Cycles through links are therefore impossible, with no visited-set needed.
//!
//! The one exception is the root: a root that is a symlink to a directory is
//! walked as that directory, and the link itself is never yielded. Cleaning
//! such a root removes the files behind it and keeps the link.
//!
//! # Cancellation
//!
//! The [`CancelToken`] is polled before every entry. Once it is set the
//! iterator ends early and [`Walk::was_cancelled`] returns `true`.

use crate::cancel::CancelToken;
use crate::error::WalkError;
use crate::model::FileEntry;
use crate::sink::LogSink;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

type RawEntries = Box<dyn Iterator<Item = Result<jwalk::DirEntry<((), ())>, jwalk::Error>>>;

/// Factory for [`Walk`] iterators sharing one sink and one cancel token.
#[derive(Clone)]
pub struct DirectoryWalker {
    sink: Arc<dyn LogSink>,
    cancel: CancelToken,
    threads: usize,
}

impl DirectoryWalker {
    /// Create a walker whose `jwalk` pool uses one thread per CPU.
    pub fn new(sink: Arc<dyn LogSink>, cancel: CancelToken) -> Self {
        Self {
            sink,
            cancel,
            threads: num_cpus::get(),
        }
    }

    /// Override the number of directory-reading threads (minimum 1).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Start walking `root`.
    ///
    /// Fails only when `root` cannot be stat'ed. The returned iterator is lazy:
    /// directories are read as it is consumed.
    pub fn walk(&self, root: &Path) -> Result<Walk, WalkError> {
        let unavailable = |source| WalkError::RootUnavailable {
            path: root.to_path_buf(),
            source,
        };
        let root_is_dir = fs::metadata(root).map_err(unavailable)?.is_dir();
        if root_is_dir {
            // jwalk only reports an unreadable root on its own entry.
            fs::read_dir(root).map_err(unavailable)?;
        }

        debug!("Walking {}", root.display());

        let entries = jwalk::WalkDir::new(root)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(jwalk::Parallelism::RayonNewPool(self.threads));

        Ok(Walk {
            root: root.to_path_buf(),
            entries: Box::new(entries.into_iter()),
            sink: Arc::clone(&self.sink),
            cancel: self.cancel.clone(),
            root_is_dir,
            error_count: 0,
            cancelled: false,
        })
    }
}

/// A lazy walk over one root. Yields only non-directory entries.
pub struct Walk {
    root: PathBuf,
    entries: RawEntries,
    sink: Arc<dyn LogSink>,
    cancel: CancelToken,
    root_is_dir: bool,
    error_count: u64,
    cancelled: bool,
}

impl Walk {
    /// Number of entries that were skipped because of an access error.
    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// `true` if the walk stopped early because cancellation was requested.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn report(&mut self, path: Option<&Path>, message: impl std::fmt::Display) {
        self.error_count += 1;
        let line = match path {
            Some(p) => format!("Error accessing path {}: {message}", p.display()),
            None => format!("Error walking {}: {message}", self.root.display()),
        };
        self.sink.log(&line);
    }
}

impl Iterator for Walk {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        if self.cancelled {
            return None;
        }

        loop {
            if self.cancel.is_cancelled() {
                debug!("Walk of {} cancelled", self.root.display());
                self.cancelled = true;
                return None;
            }

            let mut entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf);
                    self.report(path.as_deref(), &err);
                    continue;
                }
            };

            // A root that is a symlink to a directory arrives as a depth-0
            // non-directory entry; it is walked, never yielded.
            if entry.file_type().is_dir() || (self.root_is_dir && entry.depth() == 0) {
                if let Some(err) = entry.read_children_error.take() {
                    let path = entry.path();
                    self.report(Some(&path), err);
                }
                continue;
            }

            // Stat outside jwalk so a file removed since listing is caught here.
            let path = entry.path();
            match fs::symlink_metadata(&path) {
                Ok(meta) => return Some(FileEntry::new(path, meta.len())),
                Err(err) => self.report(Some(&path), err),
            }
        }
    }
}
