//! # Domain Types
//!
//! Core domain types of the checkout till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐         ┌─────────────────────┐                │
//! │  │       Sale          │ 1 ─── * │      LineItem       │                │
//! │  │  ─────────────────  │         │  ─────────────────  │                │
//! │  │  id (SaleId)        │         │  name               │                │
//! │  │  created_at         │         │  unit_price (Money) │                │
//! │  │  items (ordered)    │         │  quantity (u32)     │                │
//! │  │  total()   derived  │         │  subtotal() derived │                │
//! │  └─────────────────────┘         └─────────────────────┘                │
//! │                                                                         │
//! │  ┌─────────────────────┐                                                │
//! │  │    SaleSummary      │  status-line readout, computed on demand       │
//! │  └─────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Stored Totals
//! Neither `subtotal` nor `total` is a field. They are recomputed on every
//! read, so they can never drift from the items they summarize, and they are
//! never written to the ledger file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::SaleId;
use crate::money::Money;
use crate::validation::{validate_name, validate_quantity, validate_unit_price};

// =============================================================================
// Line Item
// =============================================================================

/// One product entry within a sale.
///
/// Immutable after creation. The only constructor runs the same checks as
/// operator input validation, including when a line item is read back from
/// the ledger file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LineItemRecord")]
pub struct LineItem {
    name: String,
    unit_price: Money,
    quantity: u32,
}

impl LineItem {
    /// Creates a line item, enforcing the line item invariants.
    ///
    /// ## Rules
    /// - name: trimmed, non-blank, at most 50 characters
    /// - unit price: greater than zero
    /// - quantity: greater than zero, at most `i32::MAX`
    /// - subtotal must fit in the cents range
    pub fn new(
        name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        validate_unit_price(unit_price)?;
        validate_quantity(quantity)?;
        unit_price
            .checked_multiply_quantity(quantity)
            .ok_or(ValidationError::InvalidQuantity)?;

        Ok(LineItem {
            name,
            unit_price,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Wire shape of a line item, checked on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemRecord {
    name: String,
    unit_price: Money,
    quantity: u32,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = ValidationError;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        LineItem::new(&record.name, record.unit_price, record.quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One checkout transaction.
///
/// Items are append-only. Whether a sale may still be mutated is decided by
/// the [`Ledger`](crate::ledger::Ledger): only the active sale is handed out
/// mutably.
///
/// The total always fits in [`Money`]: [`add_item`](Sale::add_item) refuses
/// an item that would overflow it, also when a sale is read back from the
/// ledger file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SaleRecord")]
pub struct Sale {
    id: SaleId,
    created_at: DateTime<Utc>,
    items: Vec<LineItem>,
}

impl Sale {
    pub fn new(id: SaleId, created_at: DateTime<Utc>) -> Self {
        Sale {
            id,
            created_at,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> &SaleId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Appends a line item.
    ///
    /// Fails with `InvalidQuantity` when the new total would not fit in
    /// `Money`; the sale is left unchanged.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), ValidationError> {
        if self.total().checked_add(item.subtotal()).is_none() {
            return Err(ValidationError::InvalidQuantity);
        }
        self.items.push(item);
        Ok(())
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity over all line items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| i.quantity() as u64).sum()
    }

    /// Σ line item subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> SaleSummary {
        SaleSummary::from(self)
    }
}

/// Wire shape of a sale, rebuilt through `add_item` on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleRecord {
    id: SaleId,
    created_at: DateTime<Utc>,
    items: Vec<LineItem>,
}

impl TryFrom<SaleRecord> for Sale {
    type Error = ValidationError;

    fn try_from(record: SaleRecord) -> Result<Self, Self::Error> {
        let mut sale = Sale::new(record.id, record.created_at);
        for item in record.items {
            sale.add_item(item)?;
        }
        Ok(sale)
    }
}

// =============================================================================
// Sale Summary
// =============================================================================

/// Status-line readout of a sale: `Sale: #1A2B3C4D  Items: 2  Total: $9.90`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleSummary {
    pub sale_id: SaleId,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: Money,
}

impl From<&Sale> for SaleSummary {
    fn from(sale: &Sale) -> Self {
        SaleSummary {
            sale_id: sale.id().clone(),
            item_count: sale.item_count(),
            total_quantity: sale.total_quantity(),
            total: sale.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
