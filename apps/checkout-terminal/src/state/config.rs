//! # Configuration State
//!
//! Stores application configuration resolved at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                               │
//! │     --data-dir /srv/till                                                │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     CHECKOUT_DATA_DIR=/srv/till                                         │
//! │     CHECKOUT_CURRENCY_SYMBOL=€                                          │
//! │                                                                         │
//! │  3. TOML Config File (--config, else the platform default)              │
//! │     ~/.config/checkout/checkout.toml (Linux)                            │
//! │     ~/Library/Application Support/com.checkout.till/checkout.toml       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     platform data dir, sales_history.json, $1,234.56                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! data_dir = "/srv/till"
//! ledger_file = "sales_history.json"
//! activity_log = "activity_log.txt"
//! error_log = "error_log.txt"
//!
//! [currency]
//! symbol = "€"
//! decimal_separator = ","
//! group_separator = "."   # "" disables grouping
//! ```
//!
//! Read-only after startup, so no locking.

use std::path::{Path, PathBuf};

use checkout_core::NumberFormat;
use checkout_store::{ACTIVITY_LOG_FILE_NAME, ERROR_LOG_FILE_NAME, LEDGER_FILE_NAME};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::error::{AppError, AppResult};

const CONFIG_FILE_NAME: &str = "checkout.toml";

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the ledger and the log files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory for all three files. Unset means the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,

    #[serde(default = "default_activity_log")]
    pub activity_log: String,

    #[serde(default = "default_error_log")]
    pub error_log: String,
}

fn default_ledger_file() -> String {
    LEDGER_FILE_NAME.to_string()
}

fn default_activity_log() -> String {
    ACTIVITY_LOG_FILE_NAME.to_string()
}

fn default_error_log() -> String {
    ERROR_LOG_FILE_NAME.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: None,
            ledger_file: default_ledger_file(),
            activity_log: default_activity_log(),
            error_log: default_error_log(),
        }
    }
}

// =============================================================================
// Currency Settings
// =============================================================================

/// How prices are typed and shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Exactly one character.
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,

    /// One character, or empty for no grouping.
    #[serde(default = "default_group_separator")]
    pub group_separator: String,
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

fn default_group_separator() -> String {
    ",".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            symbol: default_symbol(),
            decimal_separator: default_decimal_separator(),
            group_separator: default_group_separator(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub currency: CurrencySettings,
}

impl AppConfig {
    /// Resolves the configuration for this run.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    /// 4. Command-line flags
    pub fn resolve(cli: &Cli) -> AppResult<Self> {
        let mut config = Self::load_file(cli.config.clone())?;
        config.apply_env_overrides();
        config.apply_cli_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Reads the config file, falling back to defaults when it is absent.
    pub fn load_file(config_path: Option<PathBuf>) -> AppResult<Self> {
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            debug!("No config location available, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(&path).map_err(|source| AppError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| AppError::ConfigParse { path, source })
    }

    /// Checks the values a file or the environment may have broken.
    pub fn validate(&self) -> AppResult<()> {
        let storage = &self.storage;
        for (key, value) in [
            ("storage.ledger_file", &storage.ledger_file),
            ("storage.activity_log", &storage.activity_log),
            ("storage.error_log", &storage.error_log),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::invalid_config(format!("{key} must not be empty")));
            }
        }

        let decimal = single_char(&self.currency.decimal_separator).ok_or_else(|| {
            AppError::invalid_config("currency.decimal_separator must be exactly one character")
        })?;

        let group = match self.currency.group_separator.as_str() {
            "" => None,
            s => Some(single_char(s).ok_or_else(|| {
                AppError::invalid_config(
                    "currency.group_separator must be one character or empty",
                )
            })?),
        };

        if group == Some(decimal) {
            return Err(AppError::invalid_config(format!(
                "currency.decimal_separator and currency.group_separator are both '{decimal}'"
            )));
        }

        if decimal.is_ascii_digit() || group.is_some_and(|g| g.is_ascii_digit()) {
            return Err(AppError::invalid_config("currency separators must not be digits"));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("CHECKOUT_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(symbol) = lookup("CHECKOUT_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.currency.symbol = symbol;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.data_dir {
            self.storage.data_dir = Some(dir.clone());
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The configured data directory, else the platform data directory.
    pub fn data_dir(&self) -> AppResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or(AppError::NoDataDir),
        }
    }

    pub fn ledger_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.storage.ledger_file)
    }

    pub fn activity_log_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.storage.activity_log)
    }

    pub fn error_log_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.storage.error_log)
    }

    /// The operator's number format. Call after [`validate`](Self::validate);
    /// malformed separators fall back to the defaults.
    pub fn number_format(&self) -> NumberFormat {
        let defaults = NumberFormat::default();
        NumberFormat {
            currency_symbol: self.currency.symbol.clone(),
            decimal_separator: single_char(&self.currency.decimal_separator)
                .unwrap_or(defaults.decimal_separator),
            group_separator: match self.currency.group_separator.as_str() {
                "" => None,
                s => single_char(s).or(defaults.group_separator),
            },
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "checkout", "till")
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
