//! OS memory reclamation.
//!
//! Each supported platform maps to one opaque external command. There is no
//! timeout: if `sudo` blocks on a password prompt the step blocks with it.

use crate::error::ReclaimError;
use std::fmt;
use std::process::{Command, Stdio};
use tracing::{debug, info};

const PURGE_ARGS: &[&str] = &["purge"];
const DROP_CACHES_ARGS: &[&str] = &["sysctl", "-w", "vm.drop_caches=3"];

/// Platform-keyed reclamation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReclaimCommand {
    /// macOS: flush the unified buffer cache with `purge`.
    Purge,
    /// Linux: drop the page cache, dentries and inodes.
    DropCaches,
    /// No known command for this platform.
    Unsupported { os: String },
}

impl ReclaimCommand {
    /// Look up the command for an `std::env::consts::OS` identifier.
    pub fn for_os(os: &str) -> Self {
        match os {
            "macos" => ReclaimCommand::Purge,
            "linux" => ReclaimCommand::DropCaches,
            other => ReclaimCommand::Unsupported {
                os: other.to_owned(),
            },
        }
    }

    /// The command for the platform this binary was built for.
    pub fn current() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// The platform identifier this command belongs to.
    pub fn os(&self) -> &str {
        match self {
            ReclaimCommand::Purge => "macos",
            ReclaimCommand::DropCaches => "linux",
            ReclaimCommand::Unsupported { os } => os,
        }
    }

    /// Program and arguments, or `None` when unsupported.
    pub fn argv(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            ReclaimCommand::Purge => Some(("sudo", PURGE_ARGS)),
            ReclaimCommand::DropCaches => Some(("sudo", DROP_CACHES_ARGS)),
            ReclaimCommand::Unsupported { .. } => None,
        }
    }

    /// Run the command once and wait for it. Inherits the terminal so `sudo`
    /// can prompt.
    pub fn run(&self) -> Result<(), ReclaimError> {
        let Some((program, args)) = self.argv() else {
            return Err(ReclaimError::Unsupported {
                os: self.os().to_owned(),
            });
        };

        debug!("Running `{self}`");
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .status()
            .map_err(|source| ReclaimError::Spawn {
                command: self.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(ReclaimError::Failed {
                command: self.to_string(),
                status,
            });
        }

        info!("`{self}` completed");
        Ok(())
    }
}

impl fmt::Display for ReclaimCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argv() {
            Some((program, args)) => write!(f, "{program} {}", args.join(" ")),
            None => f.write_str("<unsupported>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_platforms_map_to_commands() {
        assert_eq!(ReclaimCommand::for_os("macos"), ReclaimCommand::Purge);
        assert_eq!(ReclaimCommand::for_os("linux"), ReclaimCommand::DropCaches);
        assert_eq!(ReclaimCommand::Purge.to_string(), "sudo purge");
        assert_eq!(
            ReclaimCommand::DropCaches.to_string(),
            "sudo sysctl -w vm.drop_caches=3"
        );
    }

    #[test]
    fn unknown_platform_is_reported_not_run() {
        let cmd = ReclaimCommand::for_os("windows");
        assert_eq!(cmd.argv(), None);

        let err = cmd.run().unwrap_err();
        assert!(matches!(err, ReclaimError::Unsupported { ref os } if os == "windows"));
        assert_eq!(err.to_string(), "unsupported operating system: windows");
    }
}
