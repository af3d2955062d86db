//! Configuration management for `sshbook`
//!
//! This module provides the `ConfigManager` for locating, loading and saving
//! the TOML settings file and the JSON profile store.

mod manager;
pub mod settings;
pub mod store_file;

pub use manager::{expand_path, ConfigManager};
pub use settings::{AppSettings, SecretSettings, SshSettings, StoreSettings};
pub use store_file::STORE_VERSION;
