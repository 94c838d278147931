use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";

pub const PATH_VAR: &str = "WIFI_CREDENTIALS_PATH";
pub const INTEGRATION_DUMP_VAR: &str = "WIFI_PROVISION_INTEGRATION_DUMP";
pub const LOG_LEVEL_VAR: &str = "WIFI_PROVISION_LOG";
pub const CARGO_WARNINGS_VAR: &str = "WIFI_PROVISION_CARGO_WARNINGS";
pub const TERMINAL_VAR: &str = "WIFI_PROVISION_TTY";

/// Terminal the operator is prompted on. It is opened directly because
/// Cargo gives build scripts a null stdin and a captured stderr.
#[cfg(windows)]
pub const DEFAULT_TERMINAL: &str = "CONIN$";
#[cfg(not(windows))]
pub const DEFAULT_TERMINAL: &str = "/dev/tty";

/// How the surrounding build was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// A real build; the operator may be prompted.
    #[default]
    Build,
    /// Tooling (an IDE, rust-analyzer) is only dumping project metadata.
    /// Nothing may block on input.
    IntegrationDump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    pub credentials_path: PathBuf,
    pub mode: RunMode,
    /// `None` reads answers from stdin instead of a terminal.
    pub terminal: Option<PathBuf>,
    /// The `.env` file that was loaded, so a build can rerun when it changes.
    pub env_file: Option<PathBuf>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIALS_PATH)
    }
}

impl ProvisionConfig {
    pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            mode: RunMode::Build,
            terminal: Some(PathBuf::from(DEFAULT_TERMINAL)),
            env_file: None,
        }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_terminal(mut self, terminal: Option<PathBuf>) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Reads the configuration from the process environment, after loading
    /// a `.env` file from the working directory if one exists. Variables
    /// already set win over the `.env` file.
    pub fn from_env() -> Self {
        let env_file = match dotenvy::dotenv() {
            Ok(path) => {
                log::debug!("loaded {}", path.display());
                Some(path)
            }
            Err(err) if err.not_found() => None,
            Err(err) => {
                log::warn!("ignoring .env: {err}");
                None
            }
        };
        let mut config = Self::from_lookup(|key| env::var(key).ok());
        config.env_file = env_file;
        config
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let credentials_path = lookup(PATH_VAR)
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string());
        let mode = if lookup(INTEGRATION_DUMP_VAR).is_some_and(|v| is_truthy(&v)) {
            RunMode::IntegrationDump
        } else {
            RunMode::Build
        };
        let terminal = match lookup(TERMINAL_VAR) {
            Some(device) if device.is_empty() || device.eq_ignore_ascii_case("none") => None,
            Some(device) => Some(PathBuf::from(device)),
            None => Some(PathBuf::from(DEFAULT_TERMINAL)),
        };
        Self::new(credentials_path)
            .with_mode(mode)
            .with_terminal(terminal)
    }
}

pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
