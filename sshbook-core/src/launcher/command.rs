//! ssh command construction

use std::fmt;

use crate::config::{expand_path, SshSettings};
use crate::error::{LaunchError, LaunchResult};
use crate::models::Profile;

/// Locale forced into the ssh environment when requested
const UTF8_LOCALE: &str = "C.UTF-8";

/// A fully resolved ssh invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    /// The program to execute
    pub program: String,
    /// Command-line arguments
    pub args: Vec<String>,
    /// Extra environment variables for the child
    pub env: Vec<(String, String)>,
}

impl SshCommand {
    /// Builds the command for a profile
    ///
    /// Produces `ssh <user>@<host> -p <port> [-i <key_path>]`, leaving out
    /// `<user>@` when the profile has no user. The key path has `~` and
    /// environment variables expanded.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::InvalidConfig` if the profile has no host.
    pub fn for_profile(profile: &Profile, settings: &SshSettings) -> LaunchResult<Self> {
        if profile.host.trim().is_empty() {
            return Err(LaunchError::InvalidConfig(format!(
                "Profile '{}' has no host",
                profile.name
            )));
        }

        let mut args = vec![
            profile.destination(),
            "-p".to_string(),
            profile.port.to_string(),
        ];

        if let Some(ref key_path) = profile.key_path {
            args.push("-i".to_string());
            args.push(expand_path(key_path).display().to_string());
        }

        let env = if settings.force_utf8_locale {
            vec![
                ("LC_ALL".to_string(), UTF8_LOCALE.to_string()),
                ("LANG".to_string(), UTF8_LOCALE.to_string()),
            ]
        } else {
            Vec::new()
        };

        Ok(Self {
            program: settings.program.clone(),
            args,
            env,
        })
    }
}

impl fmt::Display for SshCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
