/// SysCleaner Core: walking, cleaning, scanning, and monitoring.
///
/// This crate contains all business logic with zero console-prompt code.
/// Components receive their configuration, log sink, and cancellation token
/// explicitly at construction; there is no process-wide state.
///
/// # Modules
///
/// - [`walker`]: Lazy recursive directory walk that tolerates per-entry errors.
/// - [`junk`]: Junk-size reporting and best-effort junk removal per root.
/// - [`large_files`]: Top-N largest-file ranking with a live spinner.
/// - [`progress`]: Cancellable background spinner with a completion handshake.
/// - [`monitor`]: Polled CPU/RAM readout on a background thread.
/// - [`reclaim`]: Platform table of OS memory-reclamation commands.
/// - [`confirm`]: Yes/no console confirmation.
/// - [`config`]: TOML configuration loaded once at startup.
pub mod cancel;
pub mod confirm;
pub mod config;
pub mod error;
pub mod junk;
pub mod large_files;
pub mod model;
pub mod monitor;
pub mod progress;
pub mod reclaim;
pub mod sink;
pub mod walker;

pub use cancel::CancelToken;
pub use config::Config;
pub use error::{ConfigError, MetricsError, ReclaimError, ScanError, WalkError};
pub use sink::{LogSink, MemorySink, TracingSink};
