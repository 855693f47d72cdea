//! Console spinner that runs on its own thread while a long walk proceeds.
//!
//! # State machine
//!
//! ```text
//!             done signal
//!   Running ─────────────▶ StoppedOk            "\r✅ {message}\n"
//!      │
//!      │ cancel token set
//!      └─────────────────▶ StoppedInterrupted   "\r❌ {message} (interrupted)\n"
//! ```
//!
//! While `Running`, the next frame is drawn over the previous one every
//! [`FRAME_INTERVAL`]. Each tick waits on the done channel first and only
//! then looks at the cancel token, so a run ends through exactly one of the
//! two transitions.
//!
//! # Completion handshake
//!
//! [`ProgressIndicator::finish`] sends the done signal and then joins the
//! render thread, so when it returns the final line is already written and
//! flushed. Callers print their own output only after `finish` returns.

use crate::cancel::CancelToken;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Time between animation frames; also the worst-case cancellation latency.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Braille spinner frames.
pub const FRAMES: [&str; 9] = ["⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Lifecycle of a [`ProgressIndicator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Drawing frames.
    Running,
    /// The owner signalled completion.
    StoppedOk,
    /// Process-wide cancellation was observed first.
    StoppedInterrupted,
}

impl IndicatorState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, IndicatorState::Running)
    }
}

/// Handle to a running spinner.
///
/// Dropping the handle without calling [`finish`](Self::finish) still
/// signals and joins the thread.
pub struct ProgressIndicator {
    state: Arc<Mutex<IndicatorState>>,
    done_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ProgressIndicator {
    /// Spawn the render thread and start drawing `message`.
    pub fn start<W>(message: impl Into<String>, cancel: CancelToken, out: W) -> io::Result<Self>
    where
        W: Write + Send + 'static,
    {
        let message = message.into();
        let (done_tx, done_rx) = bounded::<()>(1);
        let state = Arc::new(Mutex::new(IndicatorState::Running));
        let state_clone = Arc::clone(&state);

        let thread = thread::Builder::new()
            .name("syscleaner-spinner".into())
            .spawn(move || {
                let terminal = run_spinner(&message, &done_rx, &cancel, out);
                *state_clone.lock() = terminal;
            })?;

        Ok(Self {
            state,
            done_tx: Some(done_tx),
            thread: Some(thread),
        })
    }

    /// Current state without blocking.
    pub fn state(&self) -> IndicatorState {
        *self.state.lock()
    }

    /// Signal completion and wait until the final frame is written.
    ///
    /// Returns `StoppedInterrupted` if cancellation won the race (the done
    /// signal then simply goes unread).
    pub fn finish(mut self) -> IndicatorState {
        self.stop()
    }

    fn stop(&mut self) -> IndicatorState {
        if let Some(tx) = self.done_tx.take() {
            // The receiver is gone if the thread already ended on cancellation.
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                // A panicked render thread never reached a terminal frame.
                *self.state.lock() = IndicatorState::StoppedInterrupted;
            }
        }
        *self.state.lock()
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
        }
    }
}

// ─── Render thread ──────────────────────────────────────────────────────────

fn run_spinner<W: Write>(
    message: &str,
    done_rx: &Receiver<()>,
    cancel: &CancelToken,
    mut out: W,
) -> IndicatorState {
    let mut frame = 0usize;

    loop {
        // Console write failures must not kill the loop; the owner still
        // needs a terminal state to join on.
        let _ = write!(out, "\r{} {message}", FRAMES[frame % FRAMES.len()]);
        let _ = out.flush();

        match done_rx.recv_timeout(FRAME_INTERVAL) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = writeln!(out, "\r✅ {message}");
                let _ = out.flush();
                debug!("Spinner '{message}' finished after {frame} frames");
                return IndicatorState::StoppedOk;
            }
            Err(RecvTimeoutError::Timeout) if cancel.is_cancelled() => {
                let _ = writeln!(out, "\r❌ {message} (interrupted)");
                let _ = out.flush();
                debug!("Spinner '{message}' interrupted after {frame} frames");
                return IndicatorState::StoppedInterrupted;
            }
            Err(RecvTimeoutError::Timeout) => frame += 1,
        }
    }
}
