//! # Ports
//!
//! Traits through which the workflow reaches the outside world.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   operator ◄──► │    NotificationPort      │  terminal prompts
//!                 ├──────────────────────────┤
//!   log files ◄── │      ActivityLog         │  checkout-store FileActivityLog
//!                 ├──────────────────────────┤
//!   ledger file ◄►│      LedgerStore         │  checkout-store JsonLedgerStore
//!                 └──────────────────────────┘
//! ```
//!
//! All calls are synchronous; `confirm` blocks until the operator answers.

use crate::error::PersistenceError;
use crate::types::Sale;

/// Messages and yes/no questions for the operator.
pub trait NotificationPort {
    fn show_info(&mut self, message: &str);
    fn show_warning(&mut self, message: &str);
    fn show_error(&mut self, message: &str);

    /// Asks a yes/no question. `false` cancels the pending transition.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Append-only activity and error log.
///
/// Fire-and-forget: implementations prefix each line with a timestamp and
/// must not fail the caller.
pub trait ActivityLog {
    fn append_activity(&mut self, message: &str);
    fn append_error(&mut self, message: &str);
}

/// Durable storage for completed sales.
pub trait LedgerStore {
    /// Reads all completed sales. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Sale>>, PersistenceError>;

    /// Replaces the stored history with `sales`.
    fn save(&mut self, sales: &[Sale]) -> Result<(), PersistenceError>;
}
