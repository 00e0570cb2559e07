//! Configuration system for Focusboard.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/focusboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};

use crate::timer::TimerDurations;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    timer: TimerFileConfig,
    storage: StorageFileConfig,
    ui: UiFileConfig,
}

/// `[timer]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TimerFileConfig {
    work_secs: Option<u32>,
    short_break_secs: Option<u32>,
    long_break_secs: Option<u32>,
    long_break_every: Option<u32>,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    date_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Where task and theme data are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// One file per key in this directory.
    Directory(PathBuf),
    /// In memory only; nothing survives exit.
    Ephemeral,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Timer --
    /// Interval timer phase lengths and long-break cadence.
    pub timer: TimerDurations,

    // -- Storage --
    /// Storage backend for tasks and the theme preference.
    pub storage: StorageLocation,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Display format for due dates (chrono format string).
    pub date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timer: TimerDurations::default(),
            storage: default_storage(),
            poll_timeout: Duration::from_millis(50),
            date_format: "%b %d".to_string(),
        }
    }
}

/// `<data_dir>/focusboard`, or a temp-dir fallback when no data dir exists.
fn default_storage() -> StorageLocation {
    let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    StorageLocation::Directory(base.join("focusboard"))
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. Otherwise the default path is tried and silently ignored if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Separated from `load()` to enable
    /// unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        let storage = if cli.ephemeral {
            StorageLocation::Ephemeral
        } else {
            cli.data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .map_or(defaults.storage, StorageLocation::Directory)
        };

        Self {
            timer: TimerDurations {
                work_secs: file
                    .timer
                    .work_secs
                    .unwrap_or(defaults.timer.work_secs),
                short_break_secs: file
                    .timer
                    .short_break_secs
                    .unwrap_or(defaults.timer.short_break_secs),
                long_break_secs: file
                    .timer
                    .long_break_secs
                    .unwrap_or(defaults.timer.long_break_secs),
                long_break_every: file
                    .timer
                    .long_break_every
                    .unwrap_or(defaults.timer.long_break_every),
            },
            storage,
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            date_format: file
                .ui
                .date_format
                .as_deref()
                .filter(|format| valid_date_format(format))
                .map_or(defaults.date_format, str::to_string),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal task board with a Pomodoro timer")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/focusboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for task and theme data.
    #[arg(long, env = "FOCUSBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is saved.
    #[arg(long, conflicts_with = "data_dir")]
    pub ephemeral: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "FOCUSBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/focusboard.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Whether `format` is a strftime pattern chrono can render.
///
/// Rendering an unknown specifier panics, so bad patterns are rejected here.
fn valid_date_format(format: &str) -> bool {
    let valid = !StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if !valid {
        tracing::warn!(format, "invalid ui.date_format, using the default");
    }
    valid
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("focusboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
