/// Live CPU/RAM monitor: polls a metrics source on a background thread and
/// redraws one status line per sample.
///
/// # Usage
///
/// ```ignore
/// let handle = SystemMonitor::start(Box::new(SysinfoSource::new()), settings, cancel, sink, io::stdout())?;
/// run_something_slow();
/// let summary = handle.wait();
/// ```
///
/// # Stopping
///
/// The loop ends on the first of:
/// - the owner calling [`MonitorHandle::stop`],
/// - [`MonitorSettings::run_for`] elapsing,
/// - the process-wide [`CancelToken`] being set.
///
/// All three are observed within one [`MonitorSettings::interval`].
use crate::cancel::CancelToken;
use crate::error::MetricsError;
use crate::sink::LogSink;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use sysinfo::System;
use tracing::debug;

/// Default time between samples.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// One instantaneous reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSample {
    /// Global CPU usage, 0–100.
    pub cpu_percent: f32,
    /// Used memory in bytes.
    pub memory_used: u64,
    /// Total memory in bytes.
    pub memory_total: u64,
}

impl MetricsSample {
    pub fn memory_percent(&self) -> f64 {
        if self.memory_total == 0 {
            return 0.0;
        }
        self.memory_used as f64 / self.memory_total as f64 * 100.0
    }

    /// The status line, drawn over the previous one.
    pub fn render(&self) -> String {
        format!(
            "\r🖥️ CPU Usage: {:.2}%  🏋️ RAM Usage: {:.2}%  ({:.2} GB used of {:.2} GB)  ",
            self.cpu_percent,
            self.memory_percent(),
            self.memory_used as f64 / 1e9,
            self.memory_total as f64 / 1e9
        )
    }
}

/// Anything that can be polled for a [`MetricsSample`].
pub trait MetricsSource: Send {
    fn sample(&mut self) -> Result<MetricsSample, MetricsError>;
}

/// Production source backed by `sysinfo`.
pub struct SysinfoSource {
    system: System,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut system = System::new();
        // CPU usage is a delta between two refreshes; take the first one now.
        system.refresh_cpu_usage();
        system.refresh_memory();
        Self { system }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoSource {
    fn sample(&mut self) -> Result<MetricsSample, MetricsError> {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        if self.system.cpus().is_empty() {
            return Err(MetricsError::Unavailable("CPU"));
        }
        let memory_total = self.system.total_memory();
        if memory_total == 0 {
            return Err(MetricsError::Unavailable("memory"));
        }

        Ok(MetricsSample {
            cpu_percent: self.system.global_cpu_usage(),
            memory_used: self.system.used_memory(),
            memory_total,
        })
    }
}

/// Timing knobs for a monitor run.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub interval: Duration,
    /// Stop on its own after this long. `None` runs until stopped or cancelled.
    pub run_for: Option<Duration>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            run_for: None,
        }
    }
}

/// Why a monitor loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorExit {
    Stopped,
    Expired,
    Cancelled,
}

/// Final tally returned when the monitor thread is joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSummary {
    pub samples: u64,
    pub exit: MonitorExit,
}

pub struct SystemMonitor;

impl SystemMonitor {
    /// Spawn the monitor thread. Returns as soon as the thread is running.
    pub fn start<W>(
        source: Box<dyn MetricsSource>,
        settings: MonitorSettings,
        cancel: CancelToken,
        sink: Arc<dyn LogSink>,
        out: W,
    ) -> io::Result<MonitorHandle>
    where
        W: Write + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let thread = thread::Builder::new()
            .name("syscleaner-monitor".into())
            .spawn(move || run_monitor(source, settings, &stop_rx, &cancel, sink.as_ref(), out))?;

        Ok(MonitorHandle { stop_tx, thread })
    }
}

/// Handle to a running monitor. Must be consumed by [`wait`](Self::wait) or
/// [`stop`](Self::stop) so the thread is always joined.
pub struct MonitorHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<MonitorSummary>,
}

impl MonitorHandle {
    /// Block until the loop ends by itself (duration elapsed or cancelled).
    pub fn wait(self) -> MonitorSummary {
        let MonitorHandle { stop_tx, thread } = self;
        let summary = join(thread);
        drop(stop_tx);
        summary
    }

    /// Ask the loop to end now and wait for it.
    pub fn stop(self) -> MonitorSummary {
        let _ = self.stop_tx.try_send(());
        join(self.thread)
    }
}

fn join(thread: JoinHandle<MonitorSummary>) -> MonitorSummary {
    thread.join().unwrap_or(MonitorSummary {
        samples: 0,
        exit: MonitorExit::Cancelled,
    })
}

// ─── Background thread ──────────────────────────────────────────────────────

fn run_monitor<W: Write>(
    mut source: Box<dyn MetricsSource>,
    settings: MonitorSettings,
    stop_rx: &Receiver<()>,
    cancel: &CancelToken,
    sink: &dyn LogSink,
    mut out: W,
) -> MonitorSummary {
    let deadline = settings.run_for.map(|d| Instant::now() + d);
    let mut samples = 0u64;

    let _ = writeln!(out, "\n📊 Live System Monitor (Press Ctrl+C to exit)");
    let _ = out.flush();

    let exit = loop {
        let wait = match deadline {
            Some(d) => d.saturating_duration_since(Instant::now()).min(settings.interval),
            None => settings.interval,
        };

        match stop_rx.recv_timeout(wait) {
            Ok(()) => break MonitorExit::Stopped,
            // Sender lives in the handle; disconnect only happens after join.
            Err(RecvTimeoutError::Disconnected) => break MonitorExit::Stopped,
            Err(RecvTimeoutError::Timeout) => {}
        }
        if cancel.is_cancelled() {
            break MonitorExit::Cancelled;
        }

        match source.sample() {
            Ok(sample) => {
                let _ = write!(out, "{}", sample.render());
                let _ = out.flush();
                samples += 1;
            }
            Err(err) => sink.log(&format!("Error getting system metrics: {err}")),
        }

        if deadline.is_some_and(|d| Instant::now() >= d) {
            break MonitorExit::Expired;
        }
    };

    // Terminate the redrawn status line.
    let _ = writeln!(out);
    let _ = out.flush();
    debug!("Monitor ended ({exit:?}) after {samples} samples");

    MonitorSummary { samples, exit }
}
