//! Recording fakes of the ports, shared by the unit tests.

use chrono::{TimeZone, Utc};
use std::collections::VecDeque;

use crate::error::PersistenceError;
use crate::identity::SaleId;
use crate::money::Money;
use crate::ports::{ActivityLog, LedgerStore, NotificationPort};
use crate::types::{LineItem, Sale};

pub fn sale_with(id: &str, items: &[(&str, i64, u32)]) -> Sale {
    let mut sale = Sale::new(
        SaleId::new(id),
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
    );
    for (name, cents, qty) in items {
        let item = LineItem::new(name, Money::from_cents(*cents), *qty).unwrap();
        sale.add_item(item).unwrap();
    }
    sale
}

/// Answers confirmations from a script and records every message.
#[derive(Debug, Default)]
pub struct ScriptedNotifier {
    pub answers: VecDeque<bool>,
    pub questions: Vec<String>,
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedNotifier {
    pub fn answering(answers: &[bool]) -> Self {
        ScriptedNotifier {
            answers: answers.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl NotificationPort for ScriptedNotifier {
    fn show_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn show_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

#[derive(Debug, Default)]
pub struct RecordingLog {
    pub activities: Vec<String>,
    pub errors: Vec<String>,
}

impl ActivityLog for RecordingLog {
    fn append_activity(&mut self, message: &str) {
        self.activities.push(message.to_string());
    }

    fn append_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// In-memory store; `sales: None` behaves like a missing file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub sales: Option<Vec<Sale>>,
    pub load_error: Option<PersistenceError>,
    pub save_error: Option<PersistenceError>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn with_sales(sales: Vec<Sale>) -> Self {
        MemoryStore {
            sales: Some(sales),
            ..Default::default()
        }
    }

    pub fn failing_load(reason: &str) -> Self {
        MemoryStore {
            load_error: Some(PersistenceError::load_failed(reason)),
            ..Default::default()
        }
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Sale>>, PersistenceError> {
        match &self.load_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.sales.clone()),
        }
    }

    fn save(&mut self, sales: &[Sale]) -> Result<(), PersistenceError> {
        self.saves += 1;
        if let Some(e) = &self.save_error {
            return Err(e.clone());
        }
        self.sales = Some(sales.to_vec());
        Ok(())
    }
}
