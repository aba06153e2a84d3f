//! # Sale Identity
//!
//! Sale numbers and creation timestamps.
//!
//! Both come from injectable strategies so a test can pin them down:
//!
//! ```text
//! ┌──────────────────────┐     ┌─────────────┐
//! │ dyn SaleIdGenerator  │     │  dyn Clock  │
//! │  RandomSaleIds       │     │ SystemClock │
//! │  SequentialSaleIds   │     │ FixedClock  │
//! └──────────┬───────────┘     └──────┬──────┘
//!            └───────► SaleFactory ◄──┘
//!                          │
//!                          ▼
//!              Sale { id, created_at, items: [] }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::Sale;
use crate::SALE_ID_LEN;

// =============================================================================
// Sale Id
// =============================================================================

/// Short operator-facing sale number, e.g. `1A2B3C4D`.
///
/// No uniqueness check is made; with 32 random bits per id a collision in a
/// single till's history is not a practical concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(String);

impl SaleId {
    pub fn new(id: impl Into<String>) -> Self {
        SaleId(id.into())
    }

    /// First eight hex digits of the UUID, upper-cased.
    pub fn from_uuid(uuid: Uuid) -> Self {
        let mut hex = uuid.simple().to_string();
        hex.truncate(SALE_ID_LEN);
        SaleId(hex.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Generators
// =============================================================================

/// Source of sale numbers.
pub trait SaleIdGenerator {
    fn next_id(&mut self) -> SaleId;
}

/// Production strategy: a fresh UUID v4 per sale.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSaleIds;

impl SaleIdGenerator for RandomSaleIds {
    fn next_id(&mut self) -> SaleId {
        SaleId::from_uuid(Uuid::new_v4())
    }
}

/// Deterministic strategy: `00000001`, `00000002`, ...
#[derive(Debug, Clone)]
pub struct SequentialSaleIds {
    next: u32,
}

impl SequentialSaleIds {
    pub fn starting_at(next: u32) -> Self {
        SequentialSaleIds { next }
    }
}

impl Default for SequentialSaleIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl SaleIdGenerator for SequentialSaleIds {
    fn next_id(&mut self) -> SaleId {
        let id = SaleId(format!("{:08X}", self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}

// =============================================================================
// Clocks
// =============================================================================

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =============================================================================
// Sale Factory
// =============================================================================

/// Opens new, empty sales.
pub struct SaleFactory {
    ids: Box<dyn SaleIdGenerator>,
    clock: Box<dyn Clock>,
}

impl SaleFactory {
    pub fn new(ids: impl SaleIdGenerator + 'static, clock: impl Clock + 'static) -> Self {
        SaleFactory {
            ids: Box::new(ids),
            clock: Box::new(clock),
        }
    }

    /// Creates a sale with the next id, stamped with the current time.
    pub fn open(&mut self) -> Sale {
        Sale::new(self.ids.next_id(), self.clock.now())
    }
}

impl Default for SaleFactory {
    /// Random ids, wall-clock time.
    fn default() -> Self {
        SaleFactory::new(RandomSaleIds, SystemClock)
    }
}

impl fmt::Debug for SaleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaleFactory").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
