//! # checkout-core: Pure Business Logic for the Checkout Till
//!
//! This crate is the **heart** of the till. It contains the sale data model,
//! input validation, the ledger and the checkout workflow, with zero file or
//! network dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout-terminal (operator REPL)               │   │
//! │  │      add ──► finish (F2) ──► new (F5) ──► status / history      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ NotificationPort                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │  Ledger   │  │  raw text │  │   │
//! │  │   │   Sale    │  │NumberFmt  │  │           │  │ → LineItem│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   workflow: CheckoutWorkflow over ports (Notify, Log, Store)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ LedgerStore / ActivityLog              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 checkout-store (file layer)                     │   │
//! │  │        sales_history.json, activity_log.txt, error_log.txt      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, sales, sale summaries
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`identity`] - Sale numbers and clocks (injectable)
//! - [`validation`] - Operator input → line item
//! - [`ledger`] - Completed sales plus the active one
//! - [`ports`] - Traits the outside world implements
//! - [`workflow`] - The checkout state machine
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::money::NumberFormat;
//! use checkout_core::validation::validate_line_item;
//!
//! let milk = validate_line_item("Milk", "2.50", "3", &NumberFormat::default()).unwrap();
//! assert_eq!(milk.subtotal().cents(), 750);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod identity;
pub mod ledger;
pub mod money;
pub mod ports;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CheckoutError, CoreResult, InputField, PersistenceError, ValidationError};
pub use identity::{Clock, SaleFactory, SaleId, SaleIdGenerator};
pub use ledger::Ledger;
pub use money::{Money, NumberFormat};
pub use ports::{ActivityLog, LedgerStore, NotificationPort};
pub use types::{LineItem, Sale, SaleSummary};
pub use workflow::{CheckoutState, CheckoutWorkflow};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum product name length, counted in characters after trimming.
pub const MAX_NAME_LEN: usize = 50;

/// Length of a sale number such as `1A2B3C4D`.
pub const SALE_ID_LEN: usize = 8;
