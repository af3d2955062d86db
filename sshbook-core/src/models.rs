//! Core data models for `sshbook`
//!
//! This module defines the profile record, the partial update applied by the
//! edit action, and the name-keyed collection that mirrors the store file.

mod profile;
mod profile_set;

pub use profile::{KeyPathEdit, Profile, ProfileEdit, DEFAULT_SSH_PORT};
pub use profile_set::ProfileSet;
