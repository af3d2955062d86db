//! OS keyring backend
//!
//! Stores profile passwords in the platform credential manager through the
//! `keyring` crate: Keychain on macOS, Credential Manager on Windows and the
//! Secret Service (GNOME Keyring, KWallet) elsewhere.

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{SecretError, SecretResult};

use super::backend::SecretBackend;

/// Service name entries are filed under by default
pub const DEFAULT_SERVICE: &str = "sshbook";

/// Account looked up to check that the store answers
const AVAILABILITY_ACCOUNT: &str = "availability-check";

/// OS keyring backend
///
/// Each profile maps to one keyring entry with the service name as
/// namespace and the profile name as account.
#[derive(Debug, Clone)]
pub struct KeyringBackend {
    /// Service name for stored entries
    service: String,
}

impl KeyringBackend {
    /// Creates a keyring backend filing entries under `service`
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Creates a keyring backend with the default service name
    #[must_use]
    pub fn default_app() -> Self {
        Self::new(DEFAULT_SERVICE)
    }

    /// Returns the service name
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, profile_name: &str) -> SecretResult<Entry> {
        Entry::new(&self.service, profile_name).map_err(SecretError::from)
    }
}

/// Interprets a lookup of the availability account
///
/// A missing entry still means the store answered.
fn lookup_succeeded(result: &keyring::Result<String>) -> bool {
    matches!(result, Ok(_) | Err(keyring::Error::NoEntry))
}

impl SecretBackend for KeyringBackend {
    fn store(&self, profile_name: &str, secret: &SecretString) -> SecretResult<()> {
        tracing::debug!(service = %self.service, profile = profile_name, "Keyring store");
        self.entry(profile_name)?
            .set_password(secret.expose_secret())
            .map_err(|e| SecretError::StoreFailed(format!("{profile_name}: {e}")))
    }

    fn retrieve(&self, profile_name: &str) -> SecretResult<Option<SecretString>> {
        match self.entry(profile_name)?.get_password() {
            Ok(password) => Ok(Some(SecretString::from(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretError::RetrieveFailed(format!("{profile_name}: {e}"))),
        }
    }

    fn delete(&self, profile_name: &str) -> SecretResult<()> {
        tracing::debug!(service = %self.service, profile = profile_name, "Keyring delete");
        match self.entry(profile_name)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::DeleteFailed(format!("{profile_name}: {e}"))),
        }
    }

    fn is_available(&self) -> bool {
        let result = Entry::new(&self.service, AVAILABILITY_ACCOUNT).and_then(|e| e.get_password());
        if lookup_succeeded(&result) {
            return true;
        }
        if let Err(e) = result {
            tracing::debug!(service = %self.service, error = %e, "OS keyring not reachable");
        }
        false
    }

    fn backend_id(&self) -> &'static str {
        "keyring"
    }

    fn display_name(&self) -> &'static str {
        "OS keyring"
    }
}
