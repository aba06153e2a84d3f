//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── ValidationError   - Operator input rejected                       │
//! │  ├── CheckoutError     - Workflow transition refused                   │
//! │  ├── PersistenceError  - Ledger could not be loaded / saved            │
//! │  └── MoneyParseError   - Price text could not be read                  │
//! │                                                                         │
//! │  checkout-store errors (separate crate)                                │
//! │  └── StoreError        - File / JSON failures → PersistenceError       │
//! │                                                                         │
//! │  Flow: MoneyParseError → ValidationError → CheckoutError → operator    │
//! │        StoreError → PersistenceError → log sink (never the operator)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::MAX_NAME_LEN;

// =============================================================================
// Input Field
// =============================================================================

/// The operator input a validation failure refers to.
///
/// The front-end uses this to put the cursor back on the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Name,
    Price,
    Quantity,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputField::Name => write!(f, "name"),
            InputField::Price => write!(f, "price"),
            InputField::Quantity => write!(f, "quantity"),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Line item input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// They are always shown to the operator; never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Product name is empty or whitespace only.
    #[error("Product name is required")]
    EmptyName,

    /// Product name exceeds the maximum length (after trimming).
    #[error("Product name is too long (max {max} chars)")]
    NameTooLong { max: usize },

    /// Price is unparsable, zero, or negative.
    #[error("Invalid price value")]
    InvalidPrice,

    /// Quantity is unparsable, zero, negative, or too large.
    #[error("Invalid quantity value")]
    InvalidQuantity,
}

impl ValidationError {
    /// Creates a NameTooLong error with the crate-wide limit.
    pub fn name_too_long() -> Self {
        ValidationError::NameTooLong { max: MAX_NAME_LEN }
    }

    /// Returns the input field the operator has to correct.
    pub fn field(&self) -> InputField {
        match self {
            ValidationError::EmptyName | ValidationError::NameTooLong { .. } => InputField::Name,
            ValidationError::InvalidPrice => InputField::Price,
            ValidationError::InvalidQuantity => InputField::Quantity,
        }
    }
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Checkout workflow errors.
///
/// None of these are fatal: the active sale is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Tried to finish a sale without line items.
    ///
    /// ## User Workflow
    /// ```text
    /// Press F2 (items: 0)
    ///      │
    ///      ▼
    /// EmptySale { sale_id: "1A2B3C4D" }
    ///      │
    ///      ▼
    /// Warning: "No products in current sale"
    /// ```
    #[error("No products in current sale #{sale_id}")]
    EmptySale { sale_id: String },

    /// The operator answered "no" to a confirmation prompt.
    #[error("Operation cancelled by operator")]
    Declined,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Persistence Error
// =============================================================================

/// Ledger persistence errors.
///
/// These are logged and swallowed by the workflow; the in-memory ledger
/// stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Failed to load sales history: {reason}")]
    LoadFailed { reason: String },

    #[error("Failed to save sales history: {reason}")]
    SaveFailed { reason: String },
}

impl PersistenceError {
    pub fn load_failed(reason: impl Into<String>) -> Self {
        PersistenceError::LoadFailed {
            reason: reason.into(),
        }
    }

    pub fn save_failed(reason: impl Into<String>) -> Self {
        PersistenceError::SaveFailed {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Money Parse Error
// =============================================================================

/// Failures while reading a localized amount such as `"$1,234.56"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,

    #[error("unexpected character '{0}' in amount")]
    UnexpectedChar(char),

    #[error("amount has no digits")]
    NoDigits,

    #[error("amount is too large")]
    Overflow,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CoreResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
