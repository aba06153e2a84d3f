//! # Store Error Types
//!
//! Error types for file storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the operation and the path             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistenceError (checkout-core) ← Load or save, with the reason       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  error_log.txt ← The workflow logs it and carries on                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// File storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O call on `path` failed.
    #[error("could not {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ledger file exists but is not a valid sales history.
    ///
    /// ## When This Occurs
    /// - Truncated or hand-edited JSON
    /// - A line item that breaks a sale invariant (zero quantity, blank name)
    #[error("{} is not a valid sales history: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the history failed.
    #[error("could not serialize sales history: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The temp file could not replace the target.
    #[error("could not replace {} with {}: {source}", target_path.display(), temp_path.display())]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
