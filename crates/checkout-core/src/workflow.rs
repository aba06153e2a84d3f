//! # Checkout Workflow
//!
//! The till's state machine. Every operator action is one synchronous call.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   NoActiveSale ──open──► ActiveSale(items=[]) ──add──► ActiveSale([..]) │
//! │        ▲                      ▲    │                     │   │   ▲      │
//! │        │                      │    │ finish              │   └───┘      │
//! │        │                      │    ▼                     │    add       │
//! │        │                      │  EmptySale warning       │              │
//! │        │                      │  (no change)             │ finish       │
//! │        │                      │                          ▼              │
//! │        │                      │                   confirm? ──no──► same │
//! │        │                      │                      │ yes              │
//! │        │                      │                      ▼                  │
//! │        └──────── seal + persist + notify ◄──── Finishing                │
//! │                       (then open next sale immediately)                 │
//! │                                                                         │
//! │   new (F5) with items ──confirm?──yes──► drop unfinished, open next     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancellation is the operator answering "no"; it has no side effects.
//! Persistence failures are logged and never interrupt the workflow.

use tracing::{debug, info};

use crate::error::{CheckoutError, CoreResult};
use crate::identity::SaleFactory;
use crate::ledger::Ledger;
use crate::money::NumberFormat;
use crate::ports::{ActivityLog, LedgerStore, NotificationPort};
use crate::types::{LineItem, Sale, SaleSummary};
use crate::validation::RawLineItem;

/// Observable state of the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Transient: the workflow opens the next sale on construction and
    /// after every completion, so callers normally never see this.
    NoActiveSale,
    ActiveSale { item_count: usize },
}

/// Drives one till: owns the ledger and the three ports.
pub struct CheckoutWorkflow<N, L, S> {
    ledger: Ledger,
    factory: SaleFactory,
    format: NumberFormat,
    notifier: N,
    log: L,
    store: S,
}

impl<N, L, S> CheckoutWorkflow<N, L, S>
where
    N: NotificationPort,
    L: ActivityLog,
    S: LedgerStore,
{
    /// Loads the ledger from `store` and opens the first sale.
    pub fn new(
        notifier: N,
        mut log: L,
        store: S,
        factory: SaleFactory,
        format: NumberFormat,
    ) -> Self {
        let ledger = Ledger::load(&store, &mut log);
        let mut workflow = CheckoutWorkflow {
            ledger,
            factory,
            format,
            notifier,
            log,
            store,
        };
        workflow.open_next_sale();
        workflow
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Starts a fresh sale, asking first if the current one has items.
    ///
    /// The unfinished sale is dropped, not persisted.
    pub fn start_new_sale(&mut self) -> CoreResult<SaleSummary> {
        if self.ledger.active().is_some_and(|sale| !sale.is_empty())
            && !self
                .notifier
                .confirm("Current sale has items. Start new sale anyway?")
        {
            debug!("New sale declined");
            return Err(CheckoutError::Declined);
        }

        let summary = self.open_next_sale();
        self.log.append_activity("Started new sale");
        Ok(summary)
    }

    /// Validates operator input and appends it to the active sale.
    ///
    /// On failure the error is shown to the operator and returned so the
    /// caller can re-focus `error.field()`.
    pub fn add_line_item(&mut self, raw: &RawLineItem) -> CoreResult<LineItem> {
        let item = match raw.validate(&self.format) {
            Ok(item) => item,
            Err(e) => {
                debug!(field = %e.field(), error = %e, "Line item rejected");
                self.notifier.show_error(&e.to_string());
                return Err(e.into());
            }
        };

        let sale = self.active_sale_mut();
        if let Err(e) = sale.add_item(item.clone()) {
            debug!(sale_id = %sale.id(), error = %e, "Line item would overflow sale total");
            self.notifier.show_error(&e.to_string());
            return Err(e.into());
        }
        debug!(
            sale_id = %sale.id(),
            name = item.name(),
            subtotal = %item.subtotal(),
            "Line item added"
        );

        self.log
            .append_activity(&format!("Added product: {}", item.name()));
        Ok(item)
    }

    /// Completes the active sale.
    ///
    /// ## Steps
    /// 1. Empty sale → warning, `EmptySale`, nothing else changes
    /// 2. Confirm with the total; "no" → `Declined`, sale untouched
    /// 3. Completion notice, seal into ledger, persist, open next sale
    pub fn finish_sale(&mut self) -> CoreResult<SaleSummary> {
        let sale = self.active_sale_mut();
        let summary = sale.summary();

        if summary.item_count == 0 {
            self.notifier.show_warning("No products in current sale");
            return Err(CheckoutError::EmptySale {
                sale_id: summary.sale_id.to_string(),
            });
        }

        let total = summary.total.format(&self.format);
        let question = format!("Finish sale #{}?\n\nTotal: {}", summary.sale_id, total);
        if !self.notifier.confirm(&question) {
            debug!(sale_id = %summary.sale_id, "Finish declined");
            return Err(CheckoutError::Declined);
        }

        self.notifier.show_info(&format!(
            "Sale #{} completed\nTotal: {}",
            summary.sale_id, total
        ));

        self.ledger.seal_active();
        self.ledger.save(&mut self.store, &mut self.log);
        info!(
            sale_id = %summary.sale_id,
            items = summary.item_count,
            total = %summary.total,
            "Sale completed"
        );

        self.open_next_sale();
        self.log
            .append_activity(&format!("Completed sale #{}", summary.sale_id));
        Ok(summary)
    }

    fn open_next_sale(&mut self) -> SaleSummary {
        let sale = self.factory.open();
        let summary = sale.summary();
        debug!(sale_id = %sale.id(), "Opened sale");
        if let Some(dropped) = self.ledger.open_sale(sale) {
            debug!(
                sale_id = %dropped.id(),
                items = dropped.item_count(),
                "Dropped unfinished sale"
            );
        }
        summary
    }

    fn active_sale_mut(&mut self) -> &mut Sale {
        let factory = &mut self.factory;
        self.ledger.active_or_open_with(|| factory.open())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> CheckoutState {
        match self.ledger.active() {
            Some(sale) => CheckoutState::ActiveSale {
                item_count: sale.item_count(),
            },
            None => CheckoutState::NoActiveSale,
        }
    }

    pub fn active_sale(&self) -> Option<&Sale> {
        self.ledger.active()
    }

    /// Status line of the active sale.
    pub fn summary(&self) -> Option<SaleSummary> {
        self.ledger.active().map(Sale::summary)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn number_format(&self) -> &NumberFormat {
        &self.format
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn activity_log(&self) -> &L {
        &self.log
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PersistenceError, ValidationError};
    use crate::identity::{FixedClock, SequentialSaleIds};
    use crate::money::Money;
    use crate::testing::{sale_with, MemoryStore, RecordingLog, ScriptedNotifier};
    use chrono::{TimeZone, Utc};

    type TestWorkflow = CheckoutWorkflow<ScriptedNotifier, RecordingLog, MemoryStore>;

    fn workflow_with(store: MemoryStore, answers: &[bool]) -> TestWorkflow {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        CheckoutWorkflow::new(
            ScriptedNotifier::answering(answers),
            RecordingLog::default(),
            store,
            SaleFactory::new(SequentialSaleIds::default(), clock),
            NumberFormat::default(),
        )
    }

    fn add(wf: &mut TestWorkflow, name: &str, price: &str, qty: &str) -> CoreResult<LineItem> {
        wf.add_line_item(&RawLineItem::new(name, price, qty))
    }

    #[test]
    fn test_opens_sale_on_start() {
        let wf = workflow_with(MemoryStore::default(), &[]);
        assert_eq!(wf.state(), CheckoutState::ActiveSale { item_count: 0 });
        assert_eq!(wf.active_sale().unwrap().id().as_str(), "00000001");
        assert!(wf.ledger().completed().is_empty());
    }

    #[test]
    fn test_missing_store_is_silent() {
        let wf = workflow_with(MemoryStore::default(), &[]);
        assert!(wf.notifier().errors.is_empty());
        assert!(wf.notifier().warnings.is_empty());
        assert!(wf.activity_log().errors.is_empty());
    }

    #[test]
    fn test_malformed_store_logs_and_continues() {
        let wf = workflow_with(MemoryStore::failing_load("trailing characters"), &[]);
        assert!(wf.ledger().completed().is_empty());
        assert_eq!(wf.activity_log().errors.len(), 1);
        assert!(wf.notifier().errors.is_empty());
        assert!(wf.state() == CheckoutState::ActiveSale { item_count: 0 });
    }

    #[test]
    fn test_loads_existing_history() {
        let history = vec![sale_with("OLD00001", &[("Milk", 250, 1)])];
        let wf = workflow_with(MemoryStore::with_sales(history), &[]);
        assert_eq!(wf.ledger().completed().len(), 1);
        assert_eq!(wf.ledger().len(), 2);
    }

    #[test]
    fn test_scenario_milk_and_bread() {
        let mut wf = workflow_with(MemoryStore::default(), &[]);

        let milk = add(&mut wf, "Milk", "2.50", "3").unwrap();
        assert_eq!(milk.subtotal().cents(), 750);

        add(&mut wf, "Bread", "1.20", "2").unwrap();
        let summary = wf.summary().unwrap();
        assert_eq!(summary.total.cents(), 990);
        assert_eq!(summary.item_count, 2);

        // Silent success
        assert!(wf.notifier().infos.is_empty());
        assert!(wf.notifier().errors.is_empty());
        assert_eq!(
            wf.activity_log().activities,
            ["Added product: Milk", "Added product: Bread"]
        );
    }

    #[test]
    fn test_invalid_input_is_surfaced() {
        let mut wf = workflow_with(MemoryStore::default(), &[]);

        let err = add(&mut wf, "Milk", "abc", "3").unwrap_err();
        assert_eq!(err, CheckoutError::Validation(ValidationError::InvalidPrice));
        assert_eq!(wf.notifier().errors, ["Invalid price value"]);

        let err = add(&mut wf, "", "2.50", "3").unwrap_err();
        assert_eq!(err, CheckoutError::Validation(ValidationError::EmptyName));

        assert_eq!(wf.state(), CheckoutState::ActiveSale { item_count: 0 });
        assert!(wf.activity_log().activities.is_empty());
    }

    #[test]
    fn test_item_overflowing_total_is_rejected() {
        let mut wf = workflow_with(MemoryStore::default(), &[]);

        add(&mut wf, "Gold", "50000000000000000", "1").unwrap();
        let err = add(&mut wf, "Gold", "50000000000000000", "1").unwrap_err();

        assert_eq!(err, CheckoutError::Validation(ValidationError::InvalidQuantity));
        assert_eq!(wf.notifier().errors, ["Invalid quantity value"]);
        assert_eq!(wf.activity_log().activities, ["Added product: Gold"]);

        let summary = wf.summary().unwrap();
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.total.cents(), 5_000_000_000_000_000_000);
    }

    #[test]
    fn test_finish_empty_sale_warns() {
        let mut wf = workflow_with(MemoryStore::default(), &[true]);
        let before = wf.ledger().clone();

        let err = wf.finish_sale().unwrap_err();

        assert_eq!(
            err,
            CheckoutError::EmptySale {
                sale_id: "00000001".to_string()
            }
        );
        assert_eq!(wf.notifier().warnings, ["No products in current sale"]);
        assert!(wf.notifier().questions.is_empty());
        assert_eq!(wf.ledger(), &before);
        assert_eq!(wf.active_sale().unwrap().id().as_str(), "00000001");
        assert_eq!(wf.store().saves, 0);
    }

    #[test]
    fn test_finish_declined_keeps_sale() {
        let mut wf = workflow_with(MemoryStore::default(), &[false]);
        add(&mut wf, "Milk", "2.50", "3").unwrap();

        let err = wf.finish_sale().unwrap_err();

        assert_eq!(err, CheckoutError::Declined);
        assert_eq!(
            wf.notifier().questions,
            ["Finish sale #00000001?\n\nTotal: $7.50"]
        );
        assert!(wf.notifier().infos.is_empty());
        assert!(wf.ledger().completed().is_empty());
        assert_eq!(wf.state(), CheckoutState::ActiveSale { item_count: 1 });
        assert_eq!(wf.active_sale().unwrap().total().cents(), 750);
        assert_eq!(wf.store().saves, 0);
    }

    #[test]
    fn test_finish_confirmed() {
        let mut wf = workflow_with(MemoryStore::default(), &[true]);
        add(&mut wf, "Milk", "2.50", "3").unwrap();
        add(&mut wf, "Bread", "1.20", "2").unwrap();

        let summary = wf.finish_sale().unwrap();

        assert_eq!(summary.sale_id.as_str(), "00000001");
        assert_eq!(summary.total.cents(), 990);
        assert_eq!(wf.notifier().infos, ["Sale #00000001 completed\nTotal: $9.90"]);

        // Sealed and persisted
        assert_eq!(wf.ledger().completed().len(), 1);
        let saved = wf.store().sales.as_ref().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].total().cents(), 990);

        // Next sale already open
        assert_eq!(wf.active_sale().unwrap().id().as_str(), "00000002");
        assert_eq!(wf.state(), CheckoutState::ActiveSale { item_count: 0 });
        assert_eq!(
            wf.activity_log().activities.last().unwrap(),
            "Completed sale #00000001"
        );
    }

    #[test]
    fn test_finish_survives_save_failure() {
        let mut store = MemoryStore::default();
        store.save_error = Some(PersistenceError::save_failed("permission denied"));
        let mut wf = workflow_with(store, &[true]);
        add(&mut wf, "Milk", "2.50", "1").unwrap();

        assert!(wf.finish_sale().is_ok());

        assert_eq!(wf.ledger().completed().len(), 1);
        assert_eq!(
            wf.activity_log().errors,
            ["Failed to save sales history: permission denied"]
        );
        assert!(wf.notifier().errors.is_empty());
        assert_eq!(wf.active_sale().unwrap().id().as_str(), "00000002");
    }

    #[test]
    fn test_new_sale_without_items_needs_no_confirmation() {
        let mut wf = workflow_with(MemoryStore::default(), &[]);

        let summary = wf.start_new_sale().unwrap();

        assert_eq!(summary.sale_id.as_str(), "00000002");
        assert!(wf.notifier().questions.is_empty());
        assert_eq!(wf.activity_log().activities, ["Started new sale"]);
    }

    #[test]
    fn test_new_sale_declined_keeps_items() {
        let mut wf = workflow_with(MemoryStore::default(), &[false]);
        add(&mut wf, "Milk", "2.50", "3").unwrap();

        assert_eq!(wf.start_new_sale().unwrap_err(), CheckoutError::Declined);

        assert_eq!(
            wf.notifier().questions,
            ["Current sale has items. Start new sale anyway?"]
        );
        assert_eq!(wf.active_sale().unwrap().id().as_str(), "00000001");
        assert_eq!(wf.state(), CheckoutState::ActiveSale { item_count: 1 });
    }

    #[test]
    fn test_new_sale_confirmed_drops_unfinished() {
        let mut wf = workflow_with(MemoryStore::default(), &[true]);
        add(&mut wf, "Milk", "2.50", "3").unwrap();

        wf.start_new_sale().unwrap();

        assert_eq!(wf.active_sale().unwrap().id().as_str(), "00000002");
        assert!(wf.active_sale().unwrap().is_empty());
        assert!(wf.ledger().completed().is_empty());
        assert_eq!(wf.ledger().len(), 1);
        assert_eq!(wf.store().saves, 0);
    }

    #[test]
    fn test_completed_sales_accumulate() {
        let mut wf = workflow_with(MemoryStore::default(), &[true, true]);
        add(&mut wf, "Milk", "2.50", "1").unwrap();
        wf.finish_sale().unwrap();
        add(&mut wf, "Bread", "1.20", "1").unwrap();
        wf.finish_sale().unwrap();

        let ids: Vec<_> = wf
            .ledger()
            .completed()
            .iter()
            .map(|s| s.id().as_str())
            .collect();
        assert_eq!(ids, ["00000001", "00000002"]);
        assert_eq!(wf.ledger().completed_total(), Some(Money::from_cents(370)));
        assert_eq!(wf.store().saves, 2);
    }
}
