//! # App Error Type
//!
//! Errors that stop the terminal from starting or running.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal                           │
//! │                                                                         │
//! │  Startup                                 Session                        │
//! │  ───────                                 ───────                        │
//! │  checkout.toml unreadable ─┐             ValidationError ─► show_error  │
//! │  checkout.toml invalid ────┤             EmptySale ───────► show_warning│
//! │  no data directory ────────┼─► AppError  Declined ────────► (nothing)   │
//! │  stdin/stdout broken ──────┘      │      PersistenceError ► error_log   │
//! │                                   ▼                                     │
//! │                       main prints it, exit code 1                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout errors never reach this type: the workflow reports them to the
//! operator and the session carries on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is not valid TOML: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Neither the config nor the platform provides a data directory.
    #[error("no data directory configured and no platform default available")]
    NoDataDir,

    #[error("could not create data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Terminal input or output failed.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

impl AppError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AppError::InvalidConfig(message.into())
    }
}

/// Result type for the terminal app.
pub type AppResult<T> = Result<T, AppError>;
