//! # App Configuration
//!
//! Where snapshots are stored, how long the login round-trip takes and how
//! prices are printed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Configuration Priority                                │
//! │                                                                         │
//! │  1. Defaults (lowest)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. despensa.toml (platform config dir, or --config <path>)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. DESPENSA_* environment variables (highest)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate() ──► AppConfig                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # despensa.toml
//! [storage]
//! backend = "sqlite"          # sqlite | memory
//! data_dir = "/var/lib/despensa"
//! # db_path = "/tmp/despensa.db"  # wins over data_dir
//!
//! [auth]
//! login_delay_ms = 1000
//!
//! [display]
//! currency_symbol = "€"
//!
//! [logging]
//! filter = "warn"            # e.g. "info,despensa=debug"
//! ```
//!
//! ## Environment Variables
//! `DESPENSA_DATA_DIR`, `DESPENSA_DB_PATH`, `DESPENSA_STORAGE`,
//! `DESPENSA_LOGIN_DELAY_MS`, `DESPENSA_LOG`, `DESPENSA_CURRENCY_SYMBOL`.

use std::path::PathBuf;
use std::time::Duration;

use despensa_core::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "despensa.db";

/// File name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "despensa.toml";

/// Upper bound for the simulated login delay.
pub const MAX_LOGIN_DELAY_MS: u64 = 60_000;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No platform directory could be determined for a default path.
    #[error("Could not determine the {0} directory; set DESPENSA_DATA_DIR or DESPENSA_DB_PATH")]
    NoProjectDir(&'static str),
}

// =============================================================================
// Storage Backend
// =============================================================================

/// Where store snapshots live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Local SQLite file, survives restarts.
    #[default]
    Sqlite,

    /// In-process map, gone when the process exits.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "file" => Ok(StorageBackend::Sqlite),
            "memory" | "ephemeral" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid(format!(
                "Unknown storage backend: '{}'. Valid options: sqlite, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Snapshot storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding `despensa.db`. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Explicit database file. Wins over `data_dir`.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

/// Login round-trip settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Simulated network delay for `login`, in milliseconds.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

fn default_login_delay_ms() -> u64 {
    1000
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            login_delay_ms: default_login_delay_ms(),
        }
    }
}

/// Price formatting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Log filter settings. `RUST_LOG` still wins when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`despensa.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading config from file");
                    Self::from_file(&path)?
                }
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.login_delay_ms > MAX_LOGIN_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "login_delay_ms must be at most {}, got {}",
                MAX_LOGIN_DELAY_MS, self.auth.login_delay_ms
            )));
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging filter must not be empty".into()));
        }

        if let Some(ref path) = self.storage.db_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("db_path must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Applies `DESPENSA_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DESPENSA_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(path) = lookup("DESPENSA_DB_PATH") {
            debug!(db_path = %path, "Overriding database path from environment");
            self.storage.db_path = Some(PathBuf::from(path));
        }

        if let Some(backend) = lookup("DESPENSA_STORAGE") {
            match backend.parse() {
                Ok(parsed) => self.storage.backend = parsed,
                Err(e) => warn!(backend = %backend, error = %e, "Ignoring storage backend from environment"),
            }
        }

        if let Some(delay) = lookup("DESPENSA_LOGIN_DELAY_MS") {
            match delay.trim().parse::<u64>() {
                Ok(ms) => self.auth.login_delay_ms = ms,
                Err(_) => warn!(delay = %delay, "Ignoring non-numeric login delay from environment"),
            }
        }

        if let Some(filter) = lookup("DESPENSA_LOG") {
            self.logging.filter = filter;
        }

        if let Some(symbol) = lookup("DESPENSA_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolves the SQLite database file.
    ///
    /// ## Resolution
    /// 1. `db_path` if set
    /// 2. `data_dir/despensa.db` if `data_dir` is set
    /// 3. `<platform data dir>/despensa.db`
    ///    - Linux: `~/.local/share/despensa/despensa.db`
    ///    - macOS: `~/Library/Application Support/com.despensa.despensa/despensa.db`
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.storage.db_path {
            return Ok(path.clone());
        }

        if let Some(ref dir) = self.storage.data_dir {
            return Ok(dir.join(DATABASE_FILE));
        }

        let dirs = project_dirs().ok_or(ConfigError::NoProjectDir("data"))?;
        Ok(dirs.data_dir().join(DATABASE_FILE))
    }

    /// Simulated login delay.
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.auth.login_delay_ms)
    }

    /// Formats an amount for display: `82.48 €`.
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{} {}", amount, self.display.currency_symbol)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "despensa", "despensa")
}
