//! `sshbook` Core Library
//!
//! This crate provides the core functionality for `sshbook`, a personal SSH
//! bookmark manager: the profile model and its JSON store, settings, the
//! credential store ports, the ssh launcher and the interactive menu.

pub mod config;
pub mod error;
pub mod launcher;
pub mod menu;
pub mod models;
pub mod profile;
pub mod secret;

pub use config::{AppSettings, ConfigManager};
pub use error::{
    ConfigError, ConfigResult, LaunchError, LaunchResult, SecretError, SecretResult, SshBookError,
};
pub use launcher::{LaunchOutcome, ProcessLauncher, SshCommand, SystemLauncher};
pub use menu::{Menu, MenuState, PasswordPrompt};
pub use models::{KeyPathEdit, Profile, ProfileEdit, ProfileSet, DEFAULT_SSH_PORT};
pub use profile::ProfileManager;
pub use secret::{KeyringBackend, MemoryBackend, SecretBackend};
