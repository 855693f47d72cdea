//! SysCleaner: interactive junk cleaner and system optimiser.
//!
//! Thin binary entry point. All logic lives in the `syscleaner-core`
//! and `syscleaner-cli` crates.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use syscleaner_cli::console::Stdout;
use syscleaner_cli::{Cli, Session};
use syscleaner_core::{CancelToken, Config, LogSink, TracingSink};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    cli.apply(&mut config);
    config.validate().context("invalid command-line override")?;

    // Initialise structured logging into the append-mode log file.
    init_logging(&config.log_file, cli.verbose)?;
    tracing::info!("SysCleaner starting");

    let cancel = CancelToken::new();
    install_interrupt_handler(cancel.clone())?;

    let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
    let stdin = io::stdin();
    let outcome = Session::new(&config, sink, cancel).run(&mut stdin.lock(), &mut Stdout);

    tracing::info!(?outcome, "SysCleaner finished");
    Ok(ExitCode::from(outcome.exit_code()))
}

fn init_logging(path: &Path, verbose: bool) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

/// First Ctrl+C asks every running step to wind down; a second one exits
/// immediately.
fn install_interrupt_handler(cancel: CancelToken) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        if cancel.is_cancelled() {
            std::process::exit(130);
        }
        tracing::warn!("Interrupt received, shutting down");
        eprintln!(
            "\n{}",
            "⚠️  Received interrupt signal. Cleaning up...".yellow()
        );
        cancel.cancel();
    })
    .context("failed to install Ctrl+C handler")
}
