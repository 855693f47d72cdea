/// SysCleaner CLI: the interactive console frontend.
///
/// # Modules
///
/// - [`args`]: `clap` command line, applied as overrides on the loaded config.
/// - [`console`]: Coloured glyph output and report layouts.
/// - [`session`]: The ordered report, clean, scan and reclaim flow.
pub mod args;
pub mod console;
pub mod session;

pub use args::Cli;
pub use session::{Session, SessionOutcome};
