//! # checkout-store: File Storage for the Checkout Till
//!
//! Implements the storage ports of `checkout-core` on the local disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Data Flow                                │
//! │                                                                         │
//! │  CheckoutWorkflow::finish_sale                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 checkout-store (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────────────────┐        ┌──────────────────────────┐   │    │
//! │  │   │  JsonLedgerStore    │        │   FileActivityLog        │   │    │
//! │  │   │  (ledger_file.rs)   │        │   (activity_log.rs)      │   │    │
//! │  │   │                     │        │                          │   │    │
//! │  │   │  LedgerStore port   │        │   ActivityLog port       │   │    │
//! │  │   └─────────────────────┘        └──────────────────────────┘   │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  sales_history.json               activity_log.txt / error_log.txt      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`ledger_file`] - Sales history JSON file
//! - [`activity_log`] - Timestamped log files
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_store::{FileActivityLog, JsonLedgerStore};
//!
//! let store = JsonLedgerStore::in_dir(&data_dir);
//! let log = FileActivityLog::in_dir(&data_dir);
//! let workflow = CheckoutWorkflow::new(notifier, log, store, SaleFactory::default(), format);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod activity_log;
pub mod error;
pub mod ledger_file;

// =============================================================================
// Re-exports
// =============================================================================

pub use activity_log::{FileActivityLog, ACTIVITY_LOG_FILE_NAME, ERROR_LOG_FILE_NAME};
pub use error::{StoreError, StoreResult};
pub use ledger_file::{JsonLedgerStore, LEDGER_FILE_NAME};
