//! `sshbook` CLI - Command-line entry point for the SSH bookmark manager
//!
//! Runs the interactive menu by default and offers non-interactive commands
//! for listing profiles, connecting by name and checking the store file.

use std::io::{self, IsTerminal as _, Write as _};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use sshbook_core::config::AppSettings;
use sshbook_core::error::Result as CoreResult;
use sshbook_core::menu::format_table;
use sshbook_core::{
    ConfigError, ConfigManager, KeyringBackend, LaunchError, MemoryBackend, Menu,
    PasswordPrompt, ProcessLauncher, Profile, ProfileManager, ProfileSet, SecretBackend,
    SshBookError, SshCommand, SystemLauncher,
};
use tracing_subscriber::EnvFilter;

/// Personal SSH bookmark manager
#[derive(Parser)]
#[command(name = "sshbook")]
#[command(author, version, about = "Save SSH connection profiles and connect by picking one")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the profile store (overrides the settings file)
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep passwords in memory for this session instead of the OS keyring
    #[arg(long, global = true)]
    pub no_keyring: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive menu (default)
    #[command(about = "Run the interactive menu")]
    Menu,

    /// List saved profiles
    #[command(about = "List all saved profiles")]
    List {
        /// Output format for the profile list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Connect to a saved profile
    #[command(about = "Start an ssh session for a saved profile")]
    Connect {
        /// Profile name (exact, then case-insensitive)
        name: String,
    },

    /// Check that the profile store can be read
    #[command(about = "Validate the profile store file")]
    Check,
}

/// Output format for the list command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON array
    Json,
}

/// Exit codes used by the CLI
pub mod exit_codes {
    /// Success - operation completed successfully
    pub const SUCCESS: i32 = 0;
    /// General error - configuration, store or I/O errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - profile not found or ssh could not be started
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the core library
    #[error(transparent)]
    Core(#[from] SshBookError),

    /// The store file exists but cannot be used
    #[error("Profile store {path} is invalid: {source}")]
    InvalidStore {
        /// Store location
        path: PathBuf,
        /// Parse failure
        source: ConfigError,
    },

    /// IO error on the terminal streams
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Core(err.into())
    }
}

impl From<LaunchError> for CliError {
    fn from(err: LaunchError) -> Self {
        Self::Core(err.into())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 1: General error (configuration, store, IO)
    /// - 2: Connection failure (profile not found, ssh could not be started)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.is_connection_failure() {
            exit_codes::CONNECTION_FAILURE
        } else {
            exit_codes::GENERAL_ERROR
        }
    }

    /// Returns true if this is a connection-related failure.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::Core(
                SshBookError::Launch(_) | SshBookError::Config(ConfigError::ProfileNotFound(_))
            )
        )
    }
}

/// Everything a command needs, resolved from flags and settings
struct Context {
    settings: AppSettings,
    profiles: ProfileManager,
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// Sets up `tracing` output on stderr, filtered by `RUST_LOG` (default `warn`)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Dispatches a parsed command line and returns the process exit code
fn run(cli: &Cli) -> Result<i32, CliError> {
    let context = build_context(cli)?;

    match &cli.command {
        None | Some(Commands::Menu) => cmd_menu(&context),
        Some(Commands::List { format }) => cmd_list(&context, *format),
        Some(Commands::Connect { name }) => cmd_connect(&context, name),
        Some(Commands::Check) => cmd_check(&context),
    }
}

/// Loads settings and wires the store and credential backend
fn build_context(cli: &Cli) -> CoreResult<Context> {
    build_context_with(ConfigManager::new()?, cli)
}

/// Like `build_context`, starting from the given default locations
///
/// The store location is resolved in order: `--store`, then `store.path` in
/// the settings file, then the default from `config`.
fn build_context_with(mut config: ConfigManager, cli: &Cli) -> CoreResult<Context> {
    if let Some(path) = &cli.config {
        config.set_settings_path(path.clone());
    }

    let settings = config.load_settings()?;
    config.apply_settings(&settings);
    if let Some(path) = &cli.store {
        config.set_store_path(path);
    }
    tracing::debug!(
        settings = %config.settings_path().display(),
        store = %config.store_path().display(),
        "Resolved file locations"
    );

    let secrets = select_secret_backend(&settings, cli.no_keyring);
    tracing::debug!(backend = secrets.backend_id(), "Selected credential store");

    Ok(Context {
        profiles: ProfileManager::new(config, secrets),
        settings,
    })
}

/// Picks the OS keyring unless it is disabled by flag or settings
fn select_secret_backend(settings: &AppSettings, no_keyring: bool) -> Arc<dyn SecretBackend> {
    if no_keyring || !settings.secrets.enabled {
        return Arc::new(MemoryBackend::new());
    }

    let keyring = KeyringBackend::new(settings.secrets.service.clone());
    if keyring.is_available() {
        Arc::new(keyring)
    } else {
        tracing::warn!("OS keyring unavailable, passwords are kept for this session only");
        Arc::new(MemoryBackend::new())
    }
}

/// Reads passwords from the terminal with echo turned off
struct TerminalPasswords;

impl PasswordPrompt for TerminalPasswords {
    fn read_password(&self, prompt: &str) -> io::Result<Option<String>> {
        match rpassword::prompt_password(prompt) {
            Ok(password) => Ok(Some(password)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Interactive menu command handler
///
/// Passwords are read hidden when stdin is a terminal and as plain lines
/// when input is piped.
fn cmd_menu(context: &Context) -> Result<i32, CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let launcher = SystemLauncher::new();
    let interactive = stdin.is_terminal();

    let mut menu = Menu::new(
        stdin.lock(),
        stdout.lock(),
        &context.profiles,
        &launcher,
        &context.settings.ssh,
    );
    if interactive {
        menu = menu.with_password_prompt(&TerminalPasswords);
    }
    menu.run()?;

    Ok(exit_codes::SUCCESS)
}

/// List profiles command handler
fn cmd_list(context: &Context, format: OutputFormat) -> Result<i32, CliError> {
    let profiles = context.profiles.list();

    let output = match format {
        OutputFormat::Table => format_table(&profiles),
        OutputFormat::Json => format_json(&profiles)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(exit_codes::SUCCESS)
}

/// Format profiles as a JSON array
///
/// # Errors
///
/// Returns `ConfigError::Serialize` if JSON serialization fails.
pub fn format_json(profiles: &ProfileSet) -> Result<String, CliError> {
    let output: Vec<ProfileOutput> = profiles.iter().map(ProfileOutput::from).collect();
    serde_json::to_string_pretty(&output)
        .map_err(|e| ConfigError::Serialize(format!("Failed to serialize to JSON: {e}")).into())
}

/// Profile as printed by `list --format json`
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileOutput {
    pub name: String,
    pub host: String,
    pub user: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
}

impl From<&Profile> for ProfileOutput {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            host: profile.host.clone(),
            user: profile.user.clone(),
            port: profile.port,
            key_path: profile.key_path.as_ref().map(|k| k.display().to_string()),
        }
    }
}

/// Connect command handler
///
/// Exits with the ssh client's own status once the session ends.
fn cmd_connect(context: &Context, name: &str) -> Result<i32, CliError> {
    let profile = context.profiles.find(name)?;
    let command = SshCommand::for_profile(&profile, &context.settings.ssh)?;

    eprintln!("Connecting to {}...", profile.name);
    let outcome = SystemLauncher::new().launch(&command)?;

    Ok(match outcome.exit_code {
        Some(code) => code,
        None => {
            tracing::warn!(profile = %profile.name, "ssh was terminated by a signal");
            exit_codes::GENERAL_ERROR
        }
    })
}

/// Check store command handler
///
/// # Errors
///
/// Returns `CliError::InvalidStore` if the store exists but cannot be loaded.
fn cmd_check(context: &Context) -> Result<i32, CliError> {
    let config = context.profiles.config_manager();
    let path = config.store_path().to_path_buf();

    if !path.exists() {
        println!("No profile store at {} (it will be created on first save).", path.display());
        return Ok(exit_codes::SUCCESS);
    }

    let profiles = config
        .load_profiles_strict()
        .map_err(|source| CliError::InvalidStore {
            path: path.clone(),
            source,
        })?;

    println!("{}: {} profile(s), OK.", path.display(), profiles.len());
    Ok(exit_codes::SUCCESS)
}
