//! On-disk format of the profile store
//!
//! The store is a JSON document:
//!
//! ```json
//! { "version": 1, "profiles": { "Web": { "ip": "10.0.0.5", "user": "root", "port": 22 } } }
//! ```
//!
//! Files without a `version` are the older bare mapping of name to record.
//! They are read as version 0 and upgraded in memory; the next save writes
//! the current version.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{Profile, ProfileSet, DEFAULT_SSH_PORT};

/// Store format version written by this build
pub const STORE_VERSION: u32 = 1;

/// One profile as it appears in the file; the name is the map key
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileRecord {
    #[serde(rename = "ip")]
    host: String,
    #[serde(default)]
    user: String,
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    port: u16,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_key_path"
    )]
    key_path: Option<PathBuf>,
}

const fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// Ports were written as strings by older releases
#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u64),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let port = match PortValue::deserialize(deserializer)? {
        PortValue::Number(n) => {
            u16::try_from(n).map_err(|_| D::Error::custom(format!("port {n} out of range")))?
        }
        PortValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(DEFAULT_SSH_PORT);
            }
            text.parse::<u16>()
                .map_err(|e| D::Error::custom(format!("invalid port '{text}': {e}")))?
        }
    };
    if port == 0 {
        return Err(D::Error::custom("port must be greater than 0"));
    }
    Ok(port)
}

fn deserialize_key_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

impl ProfileRecord {
    fn into_profile(self, name: String) -> Profile {
        Profile {
            name,
            host: self.host,
            user: self.user,
            port: self.port,
            key_path: self.key_path,
        }
    }
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        Self {
            host: profile.host.clone(),
            user: profile.user.clone(),
            port: profile.port,
            key_path: profile.key_path.clone(),
        }
    }
}

/// Current store layout
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    profiles: BTreeMap<String, ProfileRecord>,
}

/// Parses store file content into a profile set
///
/// Accepts the current versioned layout and the legacy bare mapping.
///
/// # Errors
///
/// Returns `ConfigError::Deserialize` for malformed content and
/// `ConfigError::UnsupportedVersion` for files from a newer release.
pub fn parse_store(content: &str) -> ConfigResult<ProfileSet> {
    let document: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| ConfigError::Deserialize(format!("invalid JSON: {e}")))?;

    let version = document.get("version").and_then(serde_json::Value::as_u64);

    let records: BTreeMap<String, ProfileRecord> = match version {
        Some(found) => {
            let found = u32::try_from(found).unwrap_or(u32::MAX);
            if found > STORE_VERSION {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: STORE_VERSION,
                });
            }
            let file: StoreFile = serde_json::from_value(document)
                .map_err(|e| ConfigError::Deserialize(e.to_string()))?;
            file.profiles
        }
        None => {
            let records: BTreeMap<String, ProfileRecord> = serde_json::from_value(document)
                .map_err(|e| ConfigError::Deserialize(format!("legacy store: {e}")))?;
            if !records.is_empty() {
                tracing::info!(
                    profiles = records.len(),
                    "Upgrading legacy profile store to version {STORE_VERSION}"
                );
            }
            records
        }
    };

    Ok(records
        .into_iter()
        .map(|(name, record)| record.into_profile(name))
        .collect())
}

/// Renders a profile set as store file content
///
/// # Errors
///
/// Returns `ConfigError::Serialize` if JSON serialization fails.
pub fn render_store(profiles: &ProfileSet) -> ConfigResult<String> {
    let file = StoreFile {
        version: STORE_VERSION,
        profiles: profiles
            .iter()
            .map(|p| (p.name.clone(), ProfileRecord::from(p)))
            .collect(),
    };
    serde_json::to_string_pretty(&file).map_err(|e| ConfigError::Serialize(e.to_string()))
}
