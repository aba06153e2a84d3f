//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A till adding 1.10 thirty times in f32 does not show 33.00.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    110 cents × 30 = 3300 cents, always                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operator Text ⇄ Money
//! ```text
//!   "$1,234.567" ──parse_localized──► Money(123457) ──format──► "$1,234.57"
//!                                          │
//!                                          └──serde──► "1234.57" (ledger file)
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::{Money, NumberFormat};
//!
//! let price = Money::parse_localized("2.50", &NumberFormat::default()).unwrap();
//! let subtotal = price.multiply_quantity(3);
//! assert_eq!(subtotal.cents(), 750);
//! assert_eq!(subtotal.format(&NumberFormat::default()), "$7.50");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::error::MoneyParseError;

// =============================================================================
// Number Format
// =============================================================================

/// How amounts are written by the operator and shown back to them.
///
/// Covers the parts of a locale the till cares about: currency symbol,
/// decimal separator and digit grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Symbol accepted before or after the number, and printed before it.
    pub currency_symbol: String,

    /// Separator between whole units and cents.
    pub decimal_separator: char,

    /// Thousands separator. `None` disables grouping.
    pub group_separator: Option<char>,
}

impl NumberFormat {
    /// The machine format used in the ledger file: no symbol, `.` decimals,
    /// no grouping.
    pub fn plain() -> Self {
        NumberFormat {
            currency_symbol: String::new(),
            decimal_separator: '.',
            group_separator: None,
        }
    }
}

impl Default for NumberFormat {
    /// `$1,234.56`
    fn default() -> Self {
        NumberFormat {
            currency_symbol: "$".to_string(),
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: parsing keeps the sign so validation can reject it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: written as a two-decimal string, never as a float
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "2.50" ──► LineItem.unit_price ──► LineItem::subtotal() ──┐           │
/// │                                                             ▼           │
/// │                                         Sale::total() = Σ subtotals     │
/// │                                                             │           │
/// │                          Status line / completion notice ◄──┘           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(250); // $2.50
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 750);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(qty as i64).map(Money)
    }

    /// Parses an amount the way an operator types it.
    ///
    /// ## Accepted Shapes (with the default format)
    /// ```text
    ///   "2.5"   "2.50"   "$2.50"   "2.50$"   " 1,234.5 "
    ///   "-2.50" "2.50-"  "($2.50)" "-$2.50"  "$-2.50"      (negative)
    ///   "2.505" → 2.51   (rounded half away from zero)
    /// ```
    ///
    /// ## Rounding
    /// Amounts are rounded to cents half away from zero: `2.505 → 2.51`,
    /// `2.504 → 2.50`, `-2.505 → -2.51`. Digits past the third fraction
    /// digit cannot change the result, so they are only checked, not kept.
    pub fn parse_localized(text: &str, format: &NumberFormat) -> Result<Money, MoneyParseError> {
        let mut body = text.trim();
        if body.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let mut negative = false;
        let mut seen_sign = false;
        if let Some(inner) = body.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            negative = true;
            seen_sign = true;
            body = inner.trim();
        }

        // Currency symbol and sign may appear on either side, in any order.
        let symbol = format.currency_symbol.as_str();
        let mut seen_symbol = symbol.is_empty();
        loop {
            if !seen_symbol {
                if let Some(rest) = body.strip_prefix(symbol) {
                    body = rest.trim_start();
                    seen_symbol = true;
                    continue;
                }
            }
            if !seen_sign {
                if let Some(rest) = body.strip_prefix('-') {
                    negative = true;
                    seen_sign = true;
                    body = rest.trim_start();
                    continue;
                }
                if let Some(rest) = body.strip_prefix('+') {
                    seen_sign = true;
                    body = rest.trim_start();
                    continue;
                }
            }
            break;
        }
        loop {
            if !seen_symbol {
                if let Some(rest) = body.strip_suffix(symbol) {
                    body = rest.trim_end();
                    seen_symbol = true;
                    continue;
                }
            }
            if !seen_sign {
                if let Some(rest) = body.strip_suffix('-') {
                    negative = true;
                    seen_sign = true;
                    body = rest.trim_end();
                    continue;
                }
                if let Some(rest) = body.strip_suffix('+') {
                    seen_sign = true;
                    body = rest.trim_end();
                    continue;
                }
            }
            break;
        }

        let mut whole: i64 = 0;
        let mut fraction = [0i64; 3];
        let mut fraction_len = 0;
        let mut digits = 0;
        let mut in_fraction = false;

        for c in body.chars() {
            if let Some(d) = c.to_digit(10) {
                digits += 1;
                if in_fraction {
                    if fraction_len < fraction.len() {
                        fraction[fraction_len] = d as i64;
                        fraction_len += 1;
                    }
                } else {
                    whole = whole
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(d as i64))
                        .ok_or(MoneyParseError::Overflow)?;
                }
            } else if c == format.decimal_separator && !in_fraction {
                in_fraction = true;
            } else if Some(c) == format.group_separator && !in_fraction {
                continue;
            } else {
                return Err(MoneyParseError::UnexpectedChar(c));
            }
        }

        if digits == 0 {
            return Err(MoneyParseError::NoDigits);
        }

        let mut cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction[0] * 10 + fraction[1]))
            .ok_or(MoneyParseError::Overflow)?;
        if fraction[2] >= 5 {
            cents = cents.checked_add(1).ok_or(MoneyParseError::Overflow)?;
        }

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Formats for display, e.g. `$1,234.56` or `-$5.50`.
    pub fn format(&self, format: &NumberFormat) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 100).unsigned_abs();
        let cents = (self.0 % 100).unsigned_abs();
        format!(
            "{}{}{}{}{:02}",
            sign,
            format.currency_symbol,
            group_digits(whole, format.group_separator),
            format.decimal_separator,
            cents
        )
    }

    /// Plain two-decimal form used in the ledger file, e.g. `1234.50`.
    pub fn to_decimal_string(&self) -> String {
        self.format(&NumberFormat::plain())
    }
}

fn group_digits(value: u64, separator: Option<char>) -> String {
    let digits = value.to_string();
    let Some(separator) = separator else {
        return digits;
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default `$1,234.56` format.
///
/// ## Note
/// This is for debugging and logs. Operator-facing text goes through
/// [`Money::format`] with the configured [`NumberFormat`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&NumberFormat::default()))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Reads `"2.50"` as written by this crate, and also plain JSON numbers
/// (`2.5`, `3`) for hand-edited files.
struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount such as \"2.50\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse_localized(v, &NumberFormat::plain()).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom(MoneyParseError::Overflow))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(MoneyParseError::Overflow))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        self.visit_str(&v.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Money, MoneyParseError> {
        Money::parse_localized(text, &NumberFormat::default())
    }

    fn european() -> NumberFormat {
        NumberFormat {
            currency_symbol: "€".to_string(),
            decimal_separator: ',',
            group_separator: Some('.'),
        }
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert!(money.is_positive());
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(123456789)), "$1,234,567.89");
    }

    #[test]
    fn test_format_european() {
        assert_eq!(Money::from_cents(123456).format(&european()), "€1.234,56");
        assert_eq!(Money::from_cents(5).format(&NumberFormat::plain()), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(max.checked_add(Money::zero()), Some(max));
    }

    #[test]
    fn test_checked_multiply_overflow() {
        assert_eq!(
            Money::from_cents(250).checked_multiply_quantity(4),
            Some(Money::from_cents(1000))
        );
        assert_eq!(Money::from_cents(i64::MAX / 2).checked_multiply_quantity(3), None);
    }

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!(parse("2.50").unwrap().cents(), 250);
        assert_eq!(parse("2.5").unwrap().cents(), 250);
        assert_eq!(parse("2").unwrap().cents(), 200);
        assert_eq!(parse(".75").unwrap().cents(), 75);
        assert_eq!(parse("3.").unwrap().cents(), 300);
        assert_eq!(parse("  1.20 ").unwrap().cents(), 120);
    }

    #[test]
    fn test_parse_currency_shapes() {
        assert_eq!(parse("$2.50").unwrap().cents(), 250);
        assert_eq!(parse("2.50$").unwrap().cents(), 250);
        assert_eq!(parse("$ 1,234.56").unwrap().cents(), 123456);
        assert_eq!(parse("+2.50").unwrap().cents(), 250);
    }

    #[test]
    fn test_parse_negative_shapes() {
        assert_eq!(parse("-2.50").unwrap().cents(), -250);
        assert_eq!(parse("2.50-").unwrap().cents(), -250);
        assert_eq!(parse("($2.50)").unwrap().cents(), -250);
        assert_eq!(parse("-$2.50").unwrap().cents(), -250);
        assert_eq!(parse("$-2.50").unwrap().cents(), -250);
    }

    #[test]
    fn test_parse_rounds_half_away_from_zero() {
        assert_eq!(parse("2.505").unwrap().cents(), 251);
        assert_eq!(parse("2.504999").unwrap().cents(), 250);
        assert_eq!(parse("2.515").unwrap().cents(), 252);
        assert_eq!(parse("0.995").unwrap().cents(), 100);
        assert_eq!(parse("-2.505").unwrap().cents(), -251);
        assert_eq!(parse("0.004").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse(""), Err(MoneyParseError::Empty));
        assert_eq!(parse("   "), Err(MoneyParseError::Empty));
        assert_eq!(parse("$"), Err(MoneyParseError::NoDigits));
        assert_eq!(parse("abc"), Err(MoneyParseError::UnexpectedChar('a')));
        assert_eq!(parse("1.2.3"), Err(MoneyParseError::UnexpectedChar('.')));
        assert_eq!(parse("--2"), Err(MoneyParseError::UnexpectedChar('-')));
        assert_eq!(parse("1.2,3"), Err(MoneyParseError::UnexpectedChar(',')));
        assert_eq!(
            parse("99999999999999999999"),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn test_parse_european() {
        let fmt = european();
        assert_eq!(Money::parse_localized("1.234,56", &fmt).unwrap().cents(), 123456);
        assert_eq!(Money::parse_localized("2,5 €", &fmt).unwrap().cents(), 250);
        assert!(Money::parse_localized("$2,50", &fmt).is_err());
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(750)).unwrap();
        assert_eq!(json, "\"7.50\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cents(), 750);
    }

    #[test]
    fn test_serde_accepts_numbers() {
        let m: Money = serde_json::from_str("2.5").unwrap();
        assert_eq!(m.cents(), 250);
        let m: Money = serde_json::from_str("3").unwrap();
        assert_eq!(m.cents(), 300);
        assert!(serde_json::from_str::<Money>("\"two\"").is_err());
    }
}
