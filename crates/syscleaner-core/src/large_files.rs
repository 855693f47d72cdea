//! Largest-file ranking.
//!
//! Walks one directory, keeps every file strictly larger than the threshold,
//! sorts the whole set descending by size and truncates it to the top N.
//! A [`ProgressIndicator`] runs for the duration of the walk and is joined
//! before the result is returned, so the caller's next line never collides
//! with a half-drawn spinner frame.

use crate::error::ScanError;
use crate::model::{FileEntry, ScanResult};
use crate::progress::{IndicatorState, ProgressIndicator};
use crate::walker::DirectoryWalker;
use rayon::slice::ParallelSliceMut;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Spinner caption shown while the walk runs.
pub const SCAN_MESSAGE: &str = "Analyzing files...";

pub struct LargeFileScanner {
    walker: DirectoryWalker,
}

impl LargeFileScanner {
    pub fn new(walker: DirectoryWalker) -> Self {
        Self { walker }
    }

    /// Scan `directory`, drawing the spinner on `progress_out`.
    ///
    /// Fails without a partial result when the root cannot be opened or the
    /// scan is interrupted.
    pub fn scan_with_progress<W>(
        &self,
        directory: &Path,
        min_size: u64,
        top_n: usize,
        progress_out: W,
    ) -> Result<ScanResult, ScanError>
    where
        W: Write + Send + 'static,
    {
        let mut walk = self.walker.walk(directory)?;

        let indicator = ProgressIndicator::start(
            SCAN_MESSAGE,
            self.walker.cancel_token().clone(),
            progress_out,
        )
        .map_err(ScanError::Indicator)?;

        let mut files: Vec<FileEntry> = walk.by_ref().filter(|e| e.size > min_size).collect();

        let terminal = indicator.finish();
        if walk.was_cancelled() || terminal == IndicatorState::StoppedInterrupted {
            return Err(ScanError::Cancelled {
                path: directory.to_path_buf(),
            });
        }

        // Stable, so equal sizes keep walk order.
        files.par_sort_by(|a, b| b.size.cmp(&a.size));
        let qualifying = files.len();
        files.truncate(top_n);

        info!(
            "Large-file scan of {}: {qualifying} files over {min_size} bytes, {} skipped entries",
            directory.display(),
            walk.error_count()
        );

        Ok(ScanResult {
            entries: files,
            qualifying,
            min_size,
        })
    }
}
