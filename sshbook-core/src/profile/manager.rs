//! Profile manager for CRUD operations
//!
//! This module provides the `ProfileManager` which handles creating, reading,
//! updating, and deleting profiles with persistence through `ConfigManager`.
//!
//! Every operation loads the store from disk, applies its change and writes
//! the whole store back. Nothing is cached between operations.
//!
//! An unreadable store reads as empty and is overwritten by the next change,
//! except a store written by a newer release, which changes refuse to touch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use secrecy::SecretString;

use crate::config::ConfigManager;
use crate::error::{ConfigError, ConfigResult, SecretResult};
use crate::models::{Profile, ProfileEdit, ProfileSet};
use crate::secret::SecretBackend;

/// Manager for profile CRUD operations
pub struct ProfileManager {
    /// Configuration manager for persistence
    config_manager: ConfigManager,
    /// Credential store for profile passwords
    secrets: Arc<dyn SecretBackend>,
    /// Set once an unreadable store has been reported at warn level
    store_warning_logged: AtomicBool,
}

impl ProfileManager {
    /// Creates a new `ProfileManager`
    #[must_use]
    pub fn new(config_manager: ConfigManager, secrets: Arc<dyn SecretBackend>) -> Self {
        Self {
            config_manager,
            secrets,
            store_warning_logged: AtomicBool::new(false),
        }
    }

    /// Returns the configuration manager
    #[must_use]
    pub const fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    /// Returns the secret backend
    #[must_use]
    pub fn secrets(&self) -> &dyn SecretBackend {
        self.secrets.as_ref()
    }

    /// Loads all profiles
    ///
    /// An unreadable store is an empty set.
    #[must_use]
    pub fn list(&self) -> ProfileSet {
        match self.config_manager.load_profiles_strict() {
            Ok(profiles) => profiles,
            Err(e) => {
                self.report_unreadable_store(&e);
                ProfileSet::new()
            }
        }
    }

    /// Loads the store ahead of a change
    ///
    /// Corrupt content is replaced by the change, but a store from a newer
    /// release is never overwritten.
    fn load_for_update(&self) -> ConfigResult<ProfileSet> {
        match self.config_manager.load_profiles_strict() {
            Ok(profiles) => Ok(profiles),
            Err(e @ ConfigError::UnsupportedVersion { .. }) => Err(e),
            Err(e) => {
                self.report_unreadable_store(&e);
                Ok(ProfileSet::new())
            }
        }
    }

    fn report_unreadable_store(&self, error: &ConfigError) {
        let path = self.config_manager.store_path().display();
        if self.store_warning_logged.swap(true, Ordering::Relaxed) {
            tracing::debug!(path = %path, error = %error, "Profile store still unreadable");
        } else {
            tracing::warn!(
                path = %path,
                error = %error,
                "Profile store unreadable, continuing with an empty store"
            );
        }
    }

    /// Gets a profile by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Profile> {
        self.list().get(name).cloned()
    }

    /// Finds a profile by exact name, then by case-insensitive name
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ProfileNotFound` if nothing matches, or
    /// `ConfigError::Validation` if several profiles match ignoring case.
    pub fn find(&self, name: &str) -> ConfigResult<Profile> {
        let profiles = self.list();

        if let Some(profile) = profiles.get(name) {
            return Ok(profile.clone());
        }

        let matches: Vec<_> = profiles
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .collect();

        match matches.as_slice() {
            [] => Err(ConfigError::ProfileNotFound(name.to_string())),
            [profile] => Ok((*profile).clone()),
            _ => {
                let names: Vec<_> = matches.iter().map(|p| p.name.as_str()).collect();
                Err(ConfigError::Validation {
                    field: "name".to_string(),
                    reason: format!("'{name}' is ambiguous: {}", names.join(", ")),
                })
            }
        }
    }

    // ========== Profile CRUD Operations ==========

    /// Adds a new profile and persists the store
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the name is already taken, the
    /// store is from a newer release, or the store cannot be written.
    pub fn add(&self, profile: Profile) -> ConfigResult<()> {
        ConfigManager::validate_profile(&profile)?;

        let mut profiles = self.load_for_update()?;
        let name = profile.name.clone();
        profiles.insert(profile)?;
        self.config_manager.save_profiles(&profiles)?;

        tracing::info!(profile = %name, "Profile added");
        Ok(())
    }

    /// Applies a partial update to a profile and persists the store
    ///
    /// Returns the updated profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile doesn't exist, the result is invalid,
    /// the store is from a newer release, or the store cannot be written.
    pub fn edit(&self, name: &str, edit: ProfileEdit) -> ConfigResult<Profile> {
        let mut profiles = self.load_for_update()?;
        let updated = profiles.edit(name, edit)?.clone();
        ConfigManager::validate_profile(&updated)?;
        self.config_manager.save_profiles(&profiles)?;

        tracing::info!(profile = %name, "Profile updated");
        Ok(updated)
    }

    /// Deletes a profile and its stored secret
    ///
    /// Deleting a name that doesn't exist changes nothing and returns `None`.
    /// Failure to delete the secret is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is from a newer release or cannot be
    /// written.
    pub fn delete(&self, name: &str) -> ConfigResult<Option<Profile>> {
        let mut profiles = self.load_for_update()?;
        let Some(removed) = profiles.remove(name) else {
            return Ok(None);
        };
        self.config_manager.save_profiles(&profiles)?;

        if let Err(e) = self.secrets.delete(name) {
            tracing::debug!(profile = %name, error = %e, "Ignoring secret deletion failure");
        }

        tracing::info!(profile = %name, "Profile deleted");
        Ok(Some(removed))
    }

    /// Stores a password for a profile in the secret backend
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the secret.
    pub fn set_password(&self, name: &str, password: &SecretString) -> SecretResult<()> {
        self.secrets.store(name, password)
    }
}

impl std::fmt::Debug for ProfileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileManager")
            .field("config_manager", &self.config_manager)
            .field("secrets", &self.secrets.backend_id())
            .finish()
    }
}
