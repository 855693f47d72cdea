//! Command-line arguments.
//!
//! Every flag is an override on top of the config file; nothing here is
//! required.

use clap::Parser;
use std::path::PathBuf;
use syscleaner_core::config::DEFAULT_CONFIG_FILE;
use syscleaner_core::model::size::parse_size;
use syscleaner_core::Config;

#[derive(Debug, Parser)]
#[command(
    name = "syscleaner",
    version,
    about = "Report and delete junk files, rank the largest files, reclaim memory"
)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the log file from the configuration.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// How many large files to list.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Large-file threshold, e.g. `500MB` or `2GB`.
    #[arg(long, value_name = "SIZE", value_parser = parse_size_arg)]
    pub min_size: Option<u64>,

    /// Seconds to run the live monitor; 0 disables it.
    #[arg(long, value_name = "SECS")]
    pub monitor_seconds: Option<u64>,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides to a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
        if let Some(top) = self.top {
            config.top_files = top;
        }
        if let Some(min_size) = self.min_size {
            config.max_file_size = min_size;
        }
        if let Some(secs) = self.monitor_seconds {
            config.monitor_seconds = secs;
        }
    }
}

fn parse_size_arg(value: &str) -> Result<u64, String> {
    parse_size(value).ok_or_else(|| format!("invalid size '{value}' (try 500MB or 2GB)"))
}
