//! Hidden password entry

use std::io;

/// Reads a secret without echoing it
///
/// The menu falls back to its own line input when no prompt is installed,
/// which is what scripted and piped sessions use.
pub trait PasswordPrompt {
    /// Shows `prompt` and reads one hidden line
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_password(&self, prompt: &str) -> io::Result<Option<String>>;
}
