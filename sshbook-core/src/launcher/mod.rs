//! Launching interactive ssh sessions
//!
//! A profile is turned into an `SshCommand` (program, arguments, extra
//! environment) and handed to a `ProcessLauncher`, which runs it in the
//! foreground with the terminal attached.

mod command;
mod process;

pub use command::SshCommand;
pub use process::{LaunchOutcome, ProcessLauncher, SystemLauncher};
