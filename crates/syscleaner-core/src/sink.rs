//! Log sink: where components report recoverable problems.
//!
//! Walks, deletions and monitor samples fail one entry at a time; those
//! failures are never returned as errors. Each component holds an
//! `Arc<dyn LogSink>` and reports the failure as one human-readable line.

use parking_lot::Mutex;
use tracing::warn;

/// Accepts one human-readable warning line per call.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards every line to the `tracing` subscriber installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        warn!("{message}");
    }
}

/// Keeps every line in memory. Used by tests and by callers that want to
/// replay warnings after an operation finishes.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines logged so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// `true` if any logged line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str) {
        self.lines.lock().push(message.to_owned());
    }
}
