//! Application settings model
//!
//! This module defines the application-wide settings stored in config.toml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Profile store settings
    #[serde(default)]
    pub store: StoreSettings,
    /// ssh client settings
    #[serde(default)]
    pub ssh: SshSettings,
    /// Credential store settings
    #[serde(default)]
    pub secrets: SecretSettings,
}

/// Profile store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Location of the profile store, `~` and `$VAR` are expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// ssh client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshSettings {
    /// Program to run, looked up on PATH
    #[serde(default = "default_program")]
    pub program: String,
    /// Force a UTF-8 locale (`LC_ALL`, `LANG`) in the ssh environment
    #[serde(default)]
    pub force_utf8_locale: bool,
}

fn default_program() -> String {
    "ssh".to_string()
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            force_utf8_locale: false,
        }
    }
}

/// Credential store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretSettings {
    /// Store passwords in the OS keyring
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Service name entries are filed under
    #[serde(default = "default_service")]
    pub service: String,
}

const fn default_true() -> bool {
    true
}

fn default_service() -> String {
    "sshbook".to_string()
}

impl Default for SecretSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            service: default_service(),
        }
    }
}
