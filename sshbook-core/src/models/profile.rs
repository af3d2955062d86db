//! Profile model representing a saved SSH destination.

use std::fmt;
use std::path::PathBuf;

/// Port used when a profile does not specify one
pub const DEFAULT_SSH_PORT: u16 = 22;

/// A saved SSH destination
///
/// The name is the unique key of the profile within the store. Host and user
/// are taken as typed; no syntax validation is performed on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Unique, non-empty name of the profile
    pub name: String,
    /// Remote host address (hostname or IP)
    pub host: String,
    /// Remote username, empty to let ssh pick the local user
    pub user: String,
    /// Remote port number
    pub port: u16,
    /// Identity file passed to `ssh -i`, `None` to use the ssh defaults or agent
    pub key_path: Option<PathBuf>,
}

impl Profile {
    /// Creates a new profile on the default SSH port without a key
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            user: user.into(),
            port: DEFAULT_SSH_PORT,
            key_path: None,
        }
    }

    /// Sets the port for this profile
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the identity file for this profile
    ///
    /// An empty path is the same as no key.
    #[must_use]
    pub fn with_key_path(mut self, key_path: impl Into<PathBuf>) -> Self {
        let key_path = key_path.into();
        self.key_path = if key_path.as_os_str().is_empty() {
            None
        } else {
            Some(key_path)
        };
        self
    }

    /// Returns the ssh destination, `user@host` or just `host` without a user
    #[must_use]
    pub fn destination(&self) -> String {
        if self.user.is_empty() {
            self.host.clone()
        } else {
            format!("{}@{}", self.user, self.host)
        }
    }

    /// Applies a partial update; absent fields keep their previous value
    pub fn apply(&mut self, edit: ProfileEdit) {
        if let Some(host) = edit.host {
            self.host = host;
        }
        if let Some(user) = edit.user {
            self.user = user;
        }
        if let Some(port) = edit.port {
            self.port = port;
        }
        match edit.key_path {
            KeyPathEdit::Keep => {}
            KeyPathEdit::Clear => self.key_path = None,
            KeyPathEdit::Set(path) => {
                self.key_path = (!path.as_os_str().is_empty()).then_some(path);
            }
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.destination(), self.port)
    }
}

/// Change to the identity file of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyPathEdit {
    /// Leave the key path as it is
    #[default]
    Keep,
    /// Remove the key path
    Clear,
    /// Replace the key path
    Set(PathBuf),
}

/// Partial update of a profile
///
/// `None` fields are left untouched when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    /// New host
    pub host: Option<String>,
    /// New username
    pub user: Option<String>,
    /// New port
    pub port: Option<u16>,
    /// Key path change
    pub key_path: KeyPathEdit,
}

impl ProfileEdit {
    /// Returns true if applying this edit changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.user.is_none()
            && self.port.is_none()
            && self.key_path == KeyPathEdit::Keep
    }
}
