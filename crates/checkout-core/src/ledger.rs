//! # Sale Ledger
//!
//! The history of all sales: the sealed, completed ones plus at most one
//! active sale.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  completed: [ #A ][ #B ][ #C ]        active: Some(#D)                  │
//! │              sealed, read-only         the only &mut Sale handed out    │
//! │                                                                         │
//! │  open_sale(#E)   → active = #E   (an unfinished #D is dropped)          │
//! │  seal_active()   → completed = [#A #B #C #D], active = None            │
//! │                                                                         │
//! │  sales() iterates completed then active, so the active sale is          │
//! │  always the last element.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only completed sales are persisted.

use tracing::{debug, info, warn};

use crate::money::Money;
use crate::ports::{ActivityLog, LedgerStore};
use crate::types::Sale;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    completed: Vec<Sale>,
    active: Option<Sale>,
}

impl Ledger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger holding previously completed sales and no active sale.
    pub fn from_history(completed: Vec<Sale>) -> Self {
        Ledger {
            completed,
            active: None,
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Loads the ledger from `store`.
    ///
    /// Never fails: a missing store gives an empty ledger, and a store that
    /// cannot be read is reported to `log` and also gives an empty ledger.
    pub fn load<S, L>(store: &S, log: &mut L) -> Ledger
    where
        S: LedgerStore + ?Sized,
        L: ActivityLog + ?Sized,
    {
        match store.load() {
            Ok(Some(sales)) => {
                info!(count = sales.len(), "Loaded sales history");
                Ledger::from_history(sales)
            }
            Ok(None) => {
                debug!("No sales history yet, starting empty");
                Ledger::new()
            }
            Err(e) => {
                warn!(error = %e, "Sales history unreadable, starting empty");
                log.append_error(&e.to_string());
                Ledger::new()
            }
        }
    }

    /// Writes the completed sales to `store`.
    ///
    /// Failures are reported to `log` and otherwise swallowed. Returns
    /// whether the write succeeded.
    pub fn save<S, L>(&self, store: &mut S, log: &mut L) -> bool
    where
        S: LedgerStore + ?Sized,
        L: ActivityLog + ?Sized,
    {
        match store.save(&self.completed) {
            Ok(()) => {
                debug!(count = self.completed.len(), "Sales history saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "Sales history not saved");
                log.append_error(&e.to_string());
                false
            }
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Makes `sale` the active sale and returns the unfinished sale it
    /// replaces, if any.
    pub fn open_sale(&mut self, sale: Sale) -> Option<Sale> {
        self.active.replace(sale)
    }

    /// The active sale, opening one from `open` if there is none.
    pub fn active_or_open_with(&mut self, open: impl FnOnce() -> Sale) -> &mut Sale {
        self.active.get_or_insert_with(open)
    }

    /// Seals the active sale into the completed history.
    pub fn seal_active(&mut self) -> Option<&Sale> {
        let sale = self.active.take()?;
        self.completed.push(sale);
        self.completed.last()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn completed(&self) -> &[Sale] {
        &self.completed
    }

    pub fn active(&self) -> Option<&Sale> {
        self.active.as_ref()
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// All sales in order; the active sale, if any, comes last.
    pub fn sales(&self) -> impl Iterator<Item = &Sale> {
        self.completed.iter().chain(self.active.iter())
    }

    /// Number of sales, including the active one.
    pub fn len(&self) -> usize {
        self.completed.len() + usize::from(self.active.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takings over all completed sales, or `None` when they exceed the
    /// cents range.
    pub fn completed_total(&self) -> Option<Money> {
        self.completed
            .iter()
            .try_fold(Money::zero(), |acc, sale| acc.checked_add(sale.total()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
