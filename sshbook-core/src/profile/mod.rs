//! Profile management for `sshbook`
//!
//! This module provides the `ProfileManager` for adding, editing, deleting
//! and looking up saved profiles.

mod manager;

pub use manager::ProfileManager;
