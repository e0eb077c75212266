//! Front-end configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_sokoban::RestartScope;
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "strictly_sokoban.toml";

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `*.txt` level files.
    #[serde(default = "default_levels_dir")]
    levels_dir: PathBuf,

    /// What a restart request starts over.
    #[serde(default)]
    restart_scope: RestartScope,

    /// Where log output goes while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Put a space between cells so the board looks square.
    #[serde(default = "default_true")]
    spaced_cells: bool,

    /// Show the symbol legend next to the board.
    #[serde(default = "default_true")]
    show_legend: bool,
}

fn default_levels_dir() -> PathBuf {
    PathBuf::from("levels")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_sokoban.log")
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels_dir: default_levels_dir(),
            restart_scope: RestartScope::default(),
            log_file: default_log_file(),
            spaced_cells: default_true(),
            show_legend: default_true(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(levels_dir = %config.levels_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else the default file if it exists, else
    /// built-in defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the levels directory.
    pub fn with_levels_dir(mut self, levels_dir: PathBuf) -> Self {
        self.levels_dir = levels_dir;
        self
    }

    /// Overrides the restart scope.
    pub fn with_restart_scope(mut self, restart_scope: RestartScope) -> Self {
        self.restart_scope = restart_scope;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
