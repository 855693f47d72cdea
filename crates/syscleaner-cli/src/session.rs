//! One interactive cleaning session, start to farewell.
//!
//! The steps run strictly in order: junk report, optional clean, optional
//! large-file scan, then memory reclamation alongside the live monitor.
//! Cancellation is checked between steps; once it is seen, every later step
//! is skipped and only the farewell is printed.

use crate::console;
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use syscleaner_core::config::expand_home;
use syscleaner_core::confirm::{confirm, read_answer};
use syscleaner_core::junk::{JunkRemover, JunkSizeReporter};
use syscleaner_core::large_files::LargeFileScanner;
use syscleaner_core::monitor::{MetricsSource, MonitorHandle, SysinfoSource, SystemMonitor};
use syscleaner_core::reclaim::ReclaimCommand;
use syscleaner_core::walker::DirectoryWalker;
use syscleaner_core::{CancelToken, Config, LogSink, ScanError};
use tracing::{debug, info};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// No junk was found; nothing after the report ran.
    NothingToDo,
    /// Every step ran.
    Completed,
    /// Ctrl+C arrived; remaining steps were skipped.
    Interrupted,
}

impl SessionOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            SessionOutcome::NothingToDo | SessionOutcome::Completed => 0,
            SessionOutcome::Interrupted => 130,
        }
    }
}

pub struct Session<'a> {
    config: &'a Config,
    sink: Arc<dyn LogSink>,
    cancel: CancelToken,
    walker: DirectoryWalker,
    reclaim: ReclaimCommand,
    metrics: Option<Box<dyn MetricsSource>>,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config, sink: Arc<dyn LogSink>, cancel: CancelToken) -> Self {
        let walker = DirectoryWalker::new(sink.clone(), cancel.clone());
        Self {
            config,
            sink,
            cancel,
            walker,
            reclaim: ReclaimCommand::current(),
            metrics: None,
        }
    }

    /// Replace the memory-reclamation command for this host.
    pub fn with_reclaim(mut self, reclaim: ReclaimCommand) -> Self {
        self.reclaim = reclaim;
        self
    }

    /// Feed the live monitor from `source` instead of `sysinfo`.
    pub fn with_metrics_source(mut self, source: Box<dyn MetricsSource>) -> Self {
        self.metrics = Some(source);
        self
    }

    /// Run every step, reading answers from `input` and drawing on `out`.
    ///
    /// `out` is cloned into the spinner and monitor threads, so all output
    /// lands on the same console.
    pub fn run<R, W>(mut self, input: &mut R, out: &mut W) -> SessionOutcome
    where
        R: BufRead,
        W: Write + Clone + Send + 'static,
    {
        console::banner(out);

        // ── Junk report ─────────────────────────────────────────────────
        console::heading(out, "🔍 Scanning junk files...");
        let report = JunkSizeReporter::new(self.walker.clone()).usage(&self.config.cleanup_paths);
        console::junk_report(out, &report);
        if self.cancel.is_cancelled() {
            return self.interrupted(out);
        }
        if report.is_clean() {
            info!("No junk found under {} roots", report.roots.len());
            console::success(out, "No junk files found! Your system is clean.");
            console::farewell(out);
            return SessionOutcome::NothingToDo;
        }
        console::junk_total(out, &report);
        info!(
            bytes = report.total_bytes(),
            files = report.total_files(),
            "Junk report complete"
        );

        // ── Clean ───────────────────────────────────────────────────────
        if confirm(input, out, "Do you want to clean junk files?") {
            console::heading(out, "🗑️  Deleting junk files...");
            let cleaned = JunkRemover::new(self.walker.clone()).clean(&self.config.cleanup_paths);
            console::clean_report(out, &cleaned);
            info!(
                removed = cleaned.removed(),
                freed = cleaned.bytes_freed(),
                failed = cleaned.failed(),
                "Junk clean complete"
            );
        } else {
            debug!("Junk clean declined");
        }
        if self.cancel.is_cancelled() {
            return self.interrupted(out);
        }

        // ── Large files ─────────────────────────────────────────────────
        if confirm(input, out, "Do you want to scan for large files?") {
            match read_answer(input, out, "📂 Enter directory to scan: ") {
                Some(dir) => self.scan_large_files(&expand_home(Path::new(&dir)), out),
                None => console::warn(out, "No directory entered, skipping the scan."),
            }
        }
        if self.cancel.is_cancelled() {
            return self.interrupted(out);
        }

        // ── Monitor + memory reclamation ────────────────────────────────
        let monitor = self.start_monitor(out);
        console::heading(out, "🚀 Optimizing Memory...");
        match self.reclaim.run() {
            Ok(()) => console::success(out, "Memory optimization complete!"),
            Err(err) => {
                self.sink.log(&format!("Error optimizing memory: {err}"));
                console::warn(out, &format!("Memory optimization failed: {err}"));
            }
        }
        if let Some(handle) = monitor {
            let summary = handle.wait();
            debug!(samples = summary.samples, exit = ?summary.exit, "Monitor finished");
        }
        if self.cancel.is_cancelled() {
            return self.interrupted(out);
        }

        console::farewell(out);
        SessionOutcome::Completed
    }

    fn scan_large_files<W>(&self, dir: &Path, out: &mut W)
    where
        W: Write + Clone + Send + 'static,
    {
        console::heading(out, &format!("🔎 Scanning for large files in: {}", dir.display()));
        let scanner = LargeFileScanner::new(self.walker.clone());
        match scanner.scan_with_progress(dir, self.config.max_file_size, self.config.top_files, out.clone()) {
            Ok(result) => console::scan_result(out, &result),
            Err(ScanError::Cancelled { .. }) => {}
            Err(err) => {
                self.sink.log(&format!("Error scanning for large files: {err}"));
                console::error(out, &format!("Could not scan {}: {err}", dir.display()));
            }
        }
    }

    fn start_monitor<W>(&mut self, out: &W) -> Option<MonitorHandle>
    where
        W: Write + Clone + Send + 'static,
    {
        let settings = self.config.monitor_settings()?;
        let source: Box<dyn MetricsSource> = match self.metrics.take() {
            Some(source) => source,
            None => Box::new(SysinfoSource::new()),
        };
        match SystemMonitor::start(source, settings, self.cancel.clone(), self.sink.clone(), out.clone()) {
            Ok(handle) => Some(handle),
            Err(err) => {
                self.sink.log(&format!("Error starting system monitor: {err}"));
                None
            }
        }
    }

    fn interrupted<W: Write>(&self, out: &mut W) -> SessionOutcome {
        info!("Session interrupted");
        console::warn(out, "Interrupted, skipping the remaining steps.");
        console::farewell(out);
        SessionOutcome::Interrupted
    }
}
