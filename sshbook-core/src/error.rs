//! Error types for `sshbook`
//!
//! This module defines all error types used throughout the application,
//! covering configuration and store files, the OS credential store, and
//! launching the external `ssh` client.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for `sshbook` operations
#[derive(Debug, Error)]
pub enum SshBookError {
    /// Configuration and profile store errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential store errors
    #[error("Secret storage error: {0}")]
    Secret(#[from] SecretError),

    /// Errors starting the ssh client
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the settings file and the profile store
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("Failed to read configuration: {0}")]
    Parse(String),

    /// Invalid value in a profile or setting
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// A directory or file could not be located
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write a file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Failed to deserialize
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),

    /// Store file was written by a newer release
    #[error("Unsupported store version {found} (this build reads up to {supported})")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },

    /// A profile with the same name already exists
    #[error("Profile already exists: {0}")]
    Duplicate(String),

    /// No profile with the given name
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
}

/// Errors related to the OS credential store
#[derive(Debug, Error)]
pub enum SecretError {
    /// Failed to store a secret
    #[error("Failed to store secret: {0}")]
    StoreFailed(String),

    /// Failed to retrieve a secret
    #[error("Failed to retrieve secret: {0}")]
    RetrieveFailed(String),

    /// Failed to delete a secret
    #[error("Failed to delete secret: {0}")]
    DeleteFailed(String),

    /// Secret backend not available
    #[error("Secret backend not available: {0}")]
    BackendUnavailable(String),

    /// keyring-specific error
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Errors related to launching the ssh client
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Required client binary not found
    #[error("Client not found: {0}")]
    ClientNotFound(PathBuf),

    /// The client could not be started
    #[error("Failed to start {program}: {reason}")]
    SpawnFailed {
        /// Program that failed to start
        program: String,
        /// Underlying OS error text
        reason: String,
    },

    /// Invalid profile for launching
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for `sshbook` operations
pub type Result<T> = std::result::Result<T, SshBookError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for secret operations
pub type SecretResult<T> = std::result::Result<T, SecretError>;

/// Result type alias for launch operations
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;
