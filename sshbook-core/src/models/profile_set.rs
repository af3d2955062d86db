//! The full collection of saved profiles, keyed by name.

use std::collections::btree_map::{BTreeMap, Entry};

use crate::error::{ConfigError, ConfigResult};

use super::profile::{Profile, ProfileEdit};

/// All saved profiles, ordered by name
///
/// This is the in-memory copy of the store file. It is loaded for a single
/// action, mutated, and written back whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: BTreeMap<String, Profile>,
}

impl ProfileSet {
    /// Creates an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if there are no profiles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Looks up a profile by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Returns true if a profile with this exact name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Iterates over profiles in name order
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    /// Returns the profile at a zero-based position in name order
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&Profile> {
        self.profiles.values().nth(index)
    }

    /// Adds a new profile
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Duplicate` if the name is already taken.
    pub fn insert(&mut self, profile: Profile) -> ConfigResult<()> {
        match self.profiles.entry(profile.name.clone()) {
            Entry::Occupied(entry) => Err(ConfigError::Duplicate(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(profile);
                Ok(())
            }
        }
    }

    /// Inserts a profile, replacing any profile with the same name
    pub fn replace(&mut self, profile: Profile) -> Option<Profile> {
        self.profiles.insert(profile.name.clone(), profile)
    }

    /// Applies a partial update to the named profile
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ProfileNotFound` if no profile has this name.
    pub fn edit(&mut self, name: &str, edit: ProfileEdit) -> ConfigResult<&Profile> {
        let profile = self
            .profiles
            .get_mut(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;
        profile.apply(edit);
        Ok(profile)
    }

    /// Removes the named profile; removing a missing name is a no-op
    pub fn remove(&mut self, name: &str) -> Option<Profile> {
        self.profiles.remove(name)
    }
}

impl FromIterator<Profile> for ProfileSet {
    /// Collects profiles; later duplicates replace earlier ones
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        let profiles = iter.into_iter().map(|p| (p.name.clone(), p)).collect();
        Self { profiles }
    }
}

impl IntoIterator for ProfileSet {
    type Item = Profile;
    type IntoIter = std::collections::btree_map::IntoValues<String, Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.into_values()
    }
}
