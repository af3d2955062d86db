//! Process-local secret backend
//!
//! Keeps secrets in memory for the lifetime of the process. Used when the OS
//! keyring is turned off and as a stand-in for the keyring in tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use secrecy::{ExposeSecret, SecretString};

use crate::error::{SecretError, SecretResult};

use super::backend::SecretBackend;

/// In-memory secret backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    secrets: Mutex<HashMap<String, SecretString>>,
}

impl MemoryBackend {
    /// Creates an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a secret is held for the profile
    #[must_use]
    pub fn contains(&self, profile_name: &str) -> bool {
        self.lock()
            .map(|secrets| secrets.contains_key(profile_name))
            .unwrap_or(false)
    }

    /// Number of stored secrets
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map(|secrets| secrets.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> SecretResult<MutexGuard<'_, HashMap<String, SecretString>>> {
        self.secrets
            .lock()
            .map_err(|_| SecretError::BackendUnavailable("memory store poisoned".to_string()))
    }
}

impl SecretBackend for MemoryBackend {
    fn store(&self, profile_name: &str, secret: &SecretString) -> SecretResult<()> {
        self.lock()?.insert(
            profile_name.to_string(),
            SecretString::from(secret.expose_secret().to_owned()),
        );
        Ok(())
    }

    fn retrieve(&self, profile_name: &str) -> SecretResult<Option<SecretString>> {
        Ok(self
            .lock()?
            .get(profile_name)
            .map(|s| SecretString::from(s.expose_secret().to_owned())))
    }

    fn delete(&self, profile_name: &str) -> SecretResult<()> {
        self.lock()?.remove(profile_name);
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_id(&self) -> &'static str {
        "memory"
    }

    fn display_name(&self) -> &'static str {
        "Session memory"
    }
}
