//! Configuration manager for settings and profile store files
//!
//! This module provides the `ConfigManager` which resolves file locations and
//! handles loading and saving the TOML settings and the JSON profile store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{Profile, ProfileSet};

use super::settings::AppSettings;
use super::store_file::{parse_store, render_store};

/// Directory name under the platform config directory
const APP_DIR: &str = "sshbook";
/// Settings file name
const CONFIG_FILE: &str = "config.toml";
/// Store file name inside the home directory
const HOME_STORE_FILE: &str = ".sshbook.json";
/// Store file name when everything lives in one directory
const STORE_FILE: &str = "profiles.json";

/// Configuration manager for `sshbook`
///
/// Settings live in `~/.config/sshbook/config.toml` and the profile store in
/// `~/.sshbook.json` by default. The store is always read and written whole.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Path of the TOML settings file
    settings_path: PathBuf,
    /// Path of the JSON profile store
    store_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new `ConfigManager` with the default locations
    ///
    /// # Errors
    ///
    /// Returns an error if the config or home directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let settings_path = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?
            .join(APP_DIR)
            .join(CONFIG_FILE);
        let store_path = dirs::home_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~")))?
            .join(HOME_STORE_FILE);
        Ok(Self {
            settings_path,
            store_path,
        })
    }

    /// Creates a `ConfigManager` with explicit file locations
    #[must_use]
    pub const fn with_paths(settings_path: PathBuf, store_path: PathBuf) -> Self {
        Self {
            settings_path,
            store_path,
        }
    }

    /// Creates a `ConfigManager` keeping both files in one directory
    ///
    /// This is useful for testing or portable setups.
    #[must_use]
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            settings_path: config_dir.join(CONFIG_FILE),
            store_path: config_dir.join(STORE_FILE),
        }
    }

    /// Returns the settings file path
    #[must_use]
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Returns the profile store path
    #[must_use]
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Points the manager at another settings file
    pub fn set_settings_path(&mut self, path: PathBuf) {
        self.settings_path = path;
    }

    /// Points the manager at another profile store
    ///
    /// `~` and environment variables in the path are expanded.
    pub fn set_store_path(&mut self, path: &Path) {
        self.store_path = expand_path(path);
    }

    /// Applies location overrides from settings
    pub fn apply_settings(&mut self, settings: &AppSettings) {
        if let Some(path) = &settings.store.path {
            self.set_store_path(path);
        }
    }

    /// Ensures the parent directory of `path` exists
    fn ensure_parent_dir(path: &Path) -> ConfigResult<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                fs::create_dir_all(dir).map_err(|e| {
                    ConfigError::Write(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })
            }
            _ => Ok(()),
        }
    }

    // ========== Profiles ==========

    /// Loads the profile store
    ///
    /// A missing file is an empty store. A file that cannot be read or parsed
    /// is also treated as empty; the failure is logged as a warning.
    #[must_use]
    pub fn load_profiles(&self) -> ProfileSet {
        match self.load_profiles_strict() {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!(
                    path = %self.store_path.display(),
                    error = %e,
                    "Profile store unreadable, continuing with an empty store"
                );
                ProfileSet::new()
            }
        }
    }

    /// Loads the profile store, reporting unreadable content
    ///
    /// Returns an empty set if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_profiles_strict(&self) -> ConfigResult<ProfileSet> {
        if !self.store_path.exists() {
            tracing::debug!(path = %self.store_path.display(), "No profile store yet");
            return Ok(ProfileSet::new());
        }

        let content = fs::read_to_string(&self.store_path).map_err(|e| {
            ConfigError::Parse(format!("Failed to read {}: {}", self.store_path.display(), e))
        })?;

        parse_store(&content)
    }

    /// Saves the whole profile store, replacing the file
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_profiles(&self, profiles: &ProfileSet) -> ConfigResult<()> {
        Self::ensure_parent_dir(&self.store_path)?;
        let content = render_store(profiles)?;
        fs::write(&self.store_path, content).map_err(|e| {
            ConfigError::Write(format!(
                "Failed to write {}: {}",
                self.store_path.display(),
                e
            ))
        })?;
        tracing::debug!(
            path = %self.store_path.display(),
            profiles = profiles.len(),
            "Profile store saved"
        );
        Ok(())
    }

    // ========== Application Settings ==========

    /// Loads application settings
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        if !self.settings_path.exists() {
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(&self.settings_path).map_err(|e| {
            ConfigError::Parse(format!(
                "Failed to read {}: {}",
                self.settings_path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            ConfigError::Deserialize(format!(
                "Failed to parse {}: {}",
                self.settings_path.display(),
                e
            ))
        })
    }

    /// Saves application settings
    ///
    /// Creates the configuration directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        Self::ensure_parent_dir(&self.settings_path)?;
        let content = toml::to_string_pretty(settings)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize: {e}")))?;

        fs::write(&self.settings_path, content).map_err(|e| {
            ConfigError::Write(format!(
                "Failed to write {}: {}",
                self.settings_path.display(),
                e
            ))
        })
    }

    // ========== Validation ==========

    /// Validates a profile before it is stored
    ///
    /// Only the name is checked; host and user are taken as typed.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid.
    pub fn validate_profile(profile: &Profile) -> ConfigResult<()> {
        if profile.name.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "name".to_string(),
                reason: "Profile name cannot be empty".to_string(),
            });
        }

        if profile.port == 0 {
            return Err(ConfigError::Validation {
                field: "port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Expands `~` and environment variables in a path
///
/// Paths that fail to expand (unset variables) are returned unchanged.
#[must_use]
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(e) => {
            tracing::debug!(path = %raw, error = %e, "Path expansion failed");
            path.to_path_buf()
        }
    }
}
