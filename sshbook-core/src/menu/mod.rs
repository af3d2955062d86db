//! Interactive text menu
//!
//! The menu is a small state machine. Every action starts from `Main`,
//! walks through its selection and form states and comes back to `Main`;
//! `Quit` ends the loop. Input is read one line at a time. Bad input is
//! reported and leads back to `Main` without touching the store.
//!
//! The menu is generic over its input and output streams and reaches the
//! outside world only through `ProfileManager` (store and secrets), a
//! `ProcessLauncher` and an optional `PasswordPrompt`, so whole sessions can
//! be scripted in tests.

mod password;
mod table;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use secrecy::SecretString;

use crate::config::SshSettings;
use crate::launcher::{ProcessLauncher, SshCommand};
use crate::models::{KeyPathEdit, Profile, ProfileEdit, DEFAULT_SSH_PORT};
use crate::profile::ProfileManager;

pub use password::PasswordPrompt;
pub use table::{format_choices, format_table};

/// Menu states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    /// Main action list
    Main,
    /// Picking a profile to connect to
    ConnectSelect,
    /// Printing the profile table
    List,
    /// Entering a new profile
    AddForm,
    /// Picking a profile to edit
    EditSelect,
    /// Editing the named profile
    EditForm(String),
    /// Picking a profile to delete
    DeleteSelect,
    /// Confirming deletion of the named profile
    DeleteConfirm(String),
    /// Loop finished
    Quit,
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    /// Launch ssh for a profile
    Connect,
    /// Show all profiles
    List,
    /// Add a profile
    Add,
    /// Edit a profile
    Edit,
    /// Delete a profile
    Delete,
    /// Leave the menu
    Quit,
}

impl MainAction {
    /// All actions in menu order
    pub const ALL: [Self; 6] = [
        Self::Connect,
        Self::List,
        Self::Add,
        Self::Edit,
        Self::Delete,
        Self::Quit,
    ];

    /// Parses a main menu answer: the entry number, or `q` for quit
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Connect),
            "2" => Some(Self::List),
            "3" => Some(Self::Add),
            "4" => Some(Self::Edit),
            "5" => Some(Self::Delete),
            "6" | "q" | "Q" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Connect => "Connect",
            Self::List => "List profiles",
            Self::Add => "Add a profile",
            Self::Edit => "Edit a profile",
            Self::Delete => "Delete a profile",
            Self::Quit => "Quit",
        }
    }

    /// State entered when this action is chosen
    #[must_use]
    pub const fn next_state(self) -> MenuState {
        match self {
            Self::Connect => MenuState::ConnectSelect,
            Self::List => MenuState::List,
            Self::Add => MenuState::AddForm,
            Self::Edit => MenuState::EditSelect,
            Self::Delete => MenuState::DeleteSelect,
            Self::Quit => MenuState::Quit,
        }
    }
}

/// Result of asking the user to pick a profile
enum Selection {
    Chosen(Profile),
    Cancelled,
    EndOfInput,
}

/// Parses a port answer; blank means the default port
///
/// Returns `None` for anything that is not a port number in 1..=65535.
#[must_use]
pub fn parse_port(input: &str) -> Option<u16> {
    let input = input.trim();
    if input.is_empty() {
        return Some(DEFAULT_SSH_PORT);
    }
    input.parse::<u16>().ok().filter(|port| *port != 0)
}

/// Interactive menu over a line-based input and an output stream
pub struct Menu<'a, R, W> {
    input: R,
    output: W,
    profiles: &'a ProfileManager,
    launcher: &'a dyn ProcessLauncher,
    ssh: &'a SshSettings,
    passwords: Option<&'a dyn PasswordPrompt>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Creates a menu reading answers from `input` and writing to `output`
    pub fn new(
        input: R,
        output: W,
        profiles: &'a ProfileManager,
        launcher: &'a dyn ProcessLauncher,
        ssh: &'a SshSettings,
    ) -> Self {
        Self {
            input,
            output,
            profiles,
            launcher,
            ssh,
            passwords: None,
        }
    }

    /// Reads passwords through `passwords` instead of the line input
    #[must_use]
    pub fn with_password_prompt(mut self, passwords: &'a dyn PasswordPrompt) -> Self {
        self.passwords = Some(passwords);
        self
    }

    /// Runs the menu until the user quits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = MenuState::Main;
        while state != MenuState::Quit {
            state = self.step(state)?;
        }
        tracing::debug!("Menu loop finished");
        Ok(())
    }

    /// Executes one state and returns the next one
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn step(&mut self, state: MenuState) -> io::Result<MenuState> {
        tracing::trace!(?state, "Menu step");
        match state {
            MenuState::Main => self.main(),
            MenuState::ConnectSelect => self.connect(),
            MenuState::List => self.list(),
            MenuState::AddForm => self.add(),
            MenuState::EditSelect => self.select_then(MenuState::EditForm),
            MenuState::EditForm(name) => self.edit(&name),
            MenuState::DeleteSelect => self.select_then(MenuState::DeleteConfirm),
            MenuState::DeleteConfirm(name) => self.delete(&name),
            MenuState::Quit => Ok(MenuState::Quit),
        }
    }

    // ========== Input helpers ==========

    /// Prints a prompt and reads one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like `prompt`, but hidden when a password prompt is installed
    fn prompt_secret(&mut self, label: &str) -> io::Result<Option<String>> {
        let Some(passwords) = self.passwords else {
            return self.prompt(label);
        };
        self.output.flush()?;
        Ok(passwords
            .read_password(label)?
            .map(|line| line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Lists profiles and reads a 1-based choice
    fn select_profile(&mut self) -> io::Result<Selection> {
        let profiles = self.profiles.list();
        if profiles.is_empty() {
            self.say("No saved profiles.")?;
            return Ok(Selection::Cancelled);
        }

        writeln!(self.output)?;
        write!(self.output, "{}", format_choices(&profiles))?;

        let Some(answer) = self.prompt("Choose a number (or 'q' to cancel): ")? else {
            return Ok(Selection::EndOfInput);
        };
        let answer = answer.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
            return Ok(Selection::Cancelled);
        }

        let chosen = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| profiles.nth(index));

        match chosen {
            Some(profile) => Ok(Selection::Chosen(profile.clone())),
            None => {
                self.say(format!("Invalid selection '{answer}'."))?;
                Ok(Selection::Cancelled)
            }
        }
    }

    fn select_then(&mut self, next: fn(String) -> MenuState) -> io::Result<MenuState> {
        Ok(match self.select_profile()? {
            Selection::Chosen(profile) => next(profile.name),
            Selection::Cancelled => MenuState::Main,
            Selection::EndOfInput => MenuState::Quit,
        })
    }

    // ========== States ==========

    fn main(&mut self) -> io::Result<MenuState> {
        writeln!(self.output)?;
        self.say("=== SSH BOOKMARKS ===")?;
        for (i, action) in MainAction::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, action.label())?;
        }

        let Some(answer) = self.prompt("Action: ")? else {
            return Ok(MenuState::Quit);
        };
        match MainAction::parse(&answer) {
            Some(action) => Ok(action.next_state()),
            None => {
                self.say(format!("Invalid choice '{}'.", answer.trim()))?;
                Ok(MenuState::Main)
            }
        }
    }

    fn list(&mut self) -> io::Result<MenuState> {
        let table = format_table(&self.profiles.list());
        writeln!(self.output)?;
        self.say(table)?;
        Ok(MenuState::Main)
    }

    fn connect(&mut self) -> io::Result<MenuState> {
        let profile = match self.select_profile()? {
            Selection::Chosen(profile) => profile,
            Selection::Cancelled => return Ok(MenuState::Main),
            Selection::EndOfInput => return Ok(MenuState::Quit),
        };

        let command = match SshCommand::for_profile(&profile, self.ssh) {
            Ok(command) => command,
            Err(e) => {
                self.say(format!("Cannot connect: {e}"))?;
                return Ok(MenuState::Main);
            }
        };

        self.say(format!("Connecting to {}...", profile.name))?;
        self.output.flush()?;

        match self.launcher.launch(&command) {
            Ok(outcome) if outcome.success() => {}
            Ok(outcome) => match outcome.exit_code {
                Some(code) => self.say(format!("ssh exited with status {code}."))?,
                None => self.say("ssh was terminated by a signal.")?,
            },
            Err(e) => {
                tracing::warn!(profile = %profile.name, error = %e, "ssh launch failed");
                self.say(format!("Could not start ssh: {e}"))?;
            }
        }
        Ok(MenuState::Main)
    }

    fn add(&mut self) -> io::Result<MenuState> {
        let Some(name) = self.prompt("Profile name (e.g. Web-Server): ")? else {
            return Ok(MenuState::Quit);
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            self.say("Profile name cannot be empty.")?;
            return Ok(MenuState::Main);
        }
        if self.profiles.get(&name).is_some() {
            self.say(format!(
                "A profile named '{name}' already exists; use Edit to change it."
            ))?;
            return Ok(MenuState::Main);
        }

        let Some(host) = self.prompt("Host or IP address: ")? else {
            return Ok(MenuState::Quit);
        };
        let Some(user) = self.prompt("Username: ")? else {
            return Ok(MenuState::Quit);
        };
        let Some(port) = self.prompt(&format!("Port [{DEFAULT_SSH_PORT}]: "))? else {
            return Ok(MenuState::Quit);
        };
        let Some(port) = parse_port(&port) else {
            self.say(format!("Invalid port '{}'.", port.trim()))?;
            return Ok(MenuState::Main);
        };
        let Some(key_path) = self.prompt("Private key path (leave blank for ssh defaults): ")?
        else {
            return Ok(MenuState::Quit);
        };
        let password_prompt = format!(
            "Password to keep in {} (leave blank to skip): ",
            self.profiles.secrets().display_name()
        );
        let Some(password) = self.prompt_secret(&password_prompt)? else {
            return Ok(MenuState::Quit);
        };

        let key_path = match key_path.trim() {
            "-" => "",
            path => path,
        };
        let profile = Profile::new(name.clone(), host.trim(), user.trim())
            .with_port(port)
            .with_key_path(PathBuf::from(key_path));

        if let Err(e) = self.profiles.add(profile) {
            self.say(format!("Could not save profile: {e}"))?;
            return Ok(MenuState::Main);
        }
        self.say(format!("Profile '{name}' saved."))?;

        if !password.is_empty() {
            self.store_password(&name, password)?;
        }
        Ok(MenuState::Main)
    }

    fn edit(&mut self, name: &str) -> io::Result<MenuState> {
        let Some(current) = self.profiles.get(name) else {
            self.say(format!("Profile '{name}' no longer exists."))?;
            return Ok(MenuState::Main);
        };
        self.say(format!("Editing '{name}'. Leave a field blank to keep it."))?;

        let Some(host) = self.prompt(&format!("Host [{}]: ", current.host))? else {
            return Ok(MenuState::Quit);
        };
        let Some(user) = self.prompt(&format!("Username [{}]: ", current.user))? else {
            return Ok(MenuState::Quit);
        };
        let Some(port) = self.prompt(&format!("Port [{}]: ", current.port))? else {
            return Ok(MenuState::Quit);
        };
        let port = if port.trim().is_empty() {
            None
        } else if let Some(port) = parse_port(&port) {
            Some(port)
        } else {
            self.say(format!("Invalid port '{}'.", port.trim()))?;
            return Ok(MenuState::Main);
        };
        let current_key = current
            .key_path
            .as_ref()
            .map_or_else(|| "none".to_string(), |k| k.display().to_string());
        let Some(key_path) =
            self.prompt(&format!("Private key path [{current_key}] ('-' to clear): "))?
        else {
            return Ok(MenuState::Quit);
        };
        let Some(password) = self.prompt_secret("New password (leave blank to keep): ")? else {
            return Ok(MenuState::Quit);
        };

        let edit = ProfileEdit {
            host: non_blank(&host),
            user: non_blank(&user),
            port,
            key_path: match key_path.trim() {
                "" => KeyPathEdit::Keep,
                "-" => KeyPathEdit::Clear,
                path => KeyPathEdit::Set(PathBuf::from(path)),
            },
        };

        if edit.is_empty() && password.is_empty() {
            self.say("No changes.")?;
            return Ok(MenuState::Main);
        }

        if !edit.is_empty() {
            match self.profiles.edit(name, edit) {
                Ok(_) => self.say(format!("Profile '{name}' updated."))?,
                Err(e) => {
                    self.say(format!("Could not update profile: {e}"))?;
                    return Ok(MenuState::Main);
                }
            }
        }
        if !password.is_empty() {
            self.store_password(name, password)?;
        }
        Ok(MenuState::Main)
    }

    fn delete(&mut self, name: &str) -> io::Result<MenuState> {
        let Some(answer) = self.prompt(&format!("Delete '{name}'? [y/N]: "))? else {
            return Ok(MenuState::Quit);
        };
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            self.say("Cancelled.")?;
            return Ok(MenuState::Main);
        }

        match self.profiles.delete(name) {
            Ok(Some(_)) => self.say(format!("Profile '{name}' deleted."))?,
            Ok(None) => self.say(format!("Profile '{name}' no longer exists."))?,
            Err(e) => self.say(format!("Could not delete profile: {e}"))?,
        }
        Ok(MenuState::Main)
    }

    fn store_password(&mut self, name: &str, password: String) -> io::Result<()> {
        let secret = SecretString::from(password);
        match self.profiles.set_password(name, &secret) {
            Ok(()) => self.say(format!(
                "Password stored in {}.",
                self.profiles.secrets().display_name()
            )),
            Err(e) => {
                tracing::warn!(profile = %name, error = %e, "Could not store password");
                self.say(format!("Warning: password not stored: {e}"))
            }
        }
    }
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
