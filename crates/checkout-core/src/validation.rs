//! # Validation Module
//!
//! Turns raw operator input into a [`LineItem`] or a [`ValidationError`].
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator types:  Name: "Milk"   Price: "2.50"   Quantity: "3"          │
//! │                                                                         │
//! │  1. Name      trim ─► blank? ─► EmptyName                               │
//! │                    └► > 50 chars? ─► NameTooLong                        │
//! │  2. Price     parse (locale) ─► fails / ≤ 0 / rounds to 0.00?          │
//! │                               ─► InvalidPrice                           │
//! │  3. Quantity  parse i32 ─► fails / ≤ 0? ─► InvalidQuantity              │
//! │                                                                         │
//! │  First failure wins; the front-end re-focuses error.field().            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions are pure.

use crate::error::ValidationError;
use crate::money::{Money, NumberFormat};
use crate::types::LineItem;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Raw Input
// =============================================================================

/// The three text fields as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLineItem {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl RawLineItem {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        RawLineItem {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    pub fn validate(&self, format: &NumberFormat) -> ValidationResult<LineItem> {
        validate_line_item(&self.name, &self.price, &self.quantity, format)
    }
}

/// Validates all three fields and builds the line item.
///
/// ## Example
/// ```rust
/// use checkout_core::money::NumberFormat;
/// use checkout_core::validation::validate_line_item;
/// use checkout_core::ValidationError;
///
/// let fmt = NumberFormat::default();
/// assert!(validate_line_item("Milk", "2.50", "3", &fmt).is_ok());
/// assert_eq!(
///     validate_line_item("Milk", "free", "3", &fmt),
///     Err(ValidationError::InvalidPrice)
/// );
/// ```
pub fn validate_line_item(
    raw_name: &str,
    raw_price: &str,
    raw_quantity: &str,
    format: &NumberFormat,
) -> ValidationResult<LineItem> {
    let name = validate_name(raw_name)?;
    let price = parse_price(raw_price, format)?;
    let quantity = parse_quantity(raw_quantity)?;
    LineItem::new(&name, price, quantity)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// Length is counted in characters, so `"Crème brûlée"` is 12 long.
pub fn validate_name(raw: &str) -> ValidationResult<String> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::name_too_long());
    }

    Ok(name.to_string())
}

/// Parses a localized price and rounds it to cents.
///
/// A price that parses but rounds down to `0.00` (e.g. `"0.004"`) is
/// rejected: a line item never carries a zero unit price.
pub fn parse_price(raw: &str, format: &NumberFormat) -> ValidationResult<Money> {
    let price =
        Money::parse_localized(raw, format).map_err(|_| ValidationError::InvalidPrice)?;
    validate_unit_price(price)?;
    Ok(price)
}

pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

/// Parses a quantity.
///
/// ## Rules
/// - Surrounding whitespace and a leading `+` are accepted
/// - Must be a whole number in the 32-bit signed range
/// - Must be positive (> 0)
pub fn parse_quantity(raw: &str) -> ValidationResult<u32> {
    let qty: i32 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity)?;

    if qty <= 0 {
        return Err(ValidationError::InvalidQuantity);
    }

    Ok(qty as u32)
}

pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 || qty > i32::MAX as u32 {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
