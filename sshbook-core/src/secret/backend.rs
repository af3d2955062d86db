//! Secret backend trait definition
//!
//! This module defines the `SecretBackend` trait that all secret storage
//! implementations must implement.

use secrecy::SecretString;

use crate::error::SecretResult;

/// Abstraction over credential stores
///
/// Secrets are addressed by profile name inside a backend-specific
/// namespace.
pub trait SecretBackend: Send + Sync {
    /// Store the secret for a profile, replacing any previous one
    ///
    /// # Errors
    /// Returns `SecretError` if the storage operation fails
    fn store(&self, profile_name: &str, secret: &SecretString) -> SecretResult<()>;

    /// Retrieve the secret for a profile
    ///
    /// # Returns
    /// `Some(secret)` if found, `None` if not found
    ///
    /// # Errors
    /// Returns `SecretError` if the retrieval operation fails
    fn retrieve(&self, profile_name: &str) -> SecretResult<Option<SecretString>>;

    /// Delete the secret for a profile
    ///
    /// Deleting a secret that does not exist succeeds.
    ///
    /// # Errors
    /// Returns `SecretError` if the deletion operation fails
    fn delete(&self, profile_name: &str) -> SecretResult<()>;

    /// Check if the backend is available and operational
    fn is_available(&self) -> bool;

    /// Returns the backend identifier (e.g., "keyring", "memory")
    fn backend_id(&self) -> &'static str;

    /// Returns a human-readable name for this backend
    fn display_name(&self) -> &'static str;
}
