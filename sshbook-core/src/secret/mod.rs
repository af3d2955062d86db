//! Secret storage for `sshbook`
//!
//! Passwords entered for a profile are handed to a credential store keyed by
//! the profile name:
//! - the OS keyring (macOS Keychain, Windows Credential Manager, Secret
//!   Service) via the `keyring` crate
//! - a process-local store used when the keyring is disabled and in tests
//!
//! Stored secrets are bookkeeping only; ssh still prompts for its password.

mod backend;
mod os_keyring;
mod memory;

pub use backend::SecretBackend;
pub use os_keyring::KeyringBackend;
pub use memory::MemoryBackend;
