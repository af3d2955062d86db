//! Running the ssh client as a foreground child process

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{LaunchError, LaunchResult};

use super::command::SshCommand;

/// How a finished ssh session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Exit code, `None` when the child was killed by a signal
    pub exit_code: Option<i32>,
}

impl LaunchOutcome {
    /// Returns true if the child exited with status 0
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Runs a resolved ssh command
///
/// Implementations block until the session ends.
pub trait ProcessLauncher {
    /// Runs the command in the foreground and waits for it
    ///
    /// # Errors
    ///
    /// Returns `LaunchError` if the process cannot be started. A session that
    /// starts and then exits non-zero is not an error.
    fn launch(&self, command: &SshCommand) -> LaunchResult<LaunchOutcome>;
}

/// Launcher that spawns a real child process
///
/// The child inherits stdin, stdout and stderr so the user drives the ssh
/// session (including any password prompt) directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    /// Creates a new system launcher
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &SshCommand) -> LaunchResult<LaunchOutcome> {
        tracing::info!(command = %command, "Starting ssh session");

        let status = Command::new(&command.program)
            .args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => LaunchError::ClientNotFound(PathBuf::from(&command.program)),
                _ => LaunchError::SpawnFailed {
                    program: command.program.clone(),
                    reason: e.to_string(),
                },
            })?;

        let outcome = LaunchOutcome {
            exit_code: status.code(),
        };
        tracing::debug!(exit_code = ?outcome.exit_code, "ssh session ended");
        Ok(outcome)
    }
}
