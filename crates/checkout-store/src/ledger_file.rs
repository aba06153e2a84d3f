//! # Ledger File
//!
//! The completed-sales history as one pretty-printed JSON document.
//!
//! ## File Shape
//! ```text
//! [
//!   {
//!     "id": "3F2A9C1B",
//!     "createdAt": "2024-05-01T09:30:00Z",
//!     "items": [
//!       { "name": "Milk", "unitPrice": "2.50", "quantity": 3 }
//!     ]
//!   }
//! ]
//! ```
//!
//! ## Save Sequence
//! ```text
//! serialize ─► create parent dir ─► write sales_history.json.tmp
//!           ─► fsync ─► rename over sales_history.json
//! ```
//! A crash at any step leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use checkout_core::{LedgerStore, PersistenceError, Sale};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Default file name inside the data directory.
pub const LEDGER_FILE_NAME: &str = "sales_history.json";

/// [`LedgerStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLedgerStore { path: path.into() }
    }

    /// Store at `LEDGER_FILE_NAME` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(LEDGER_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the history. A missing file is `Ok(None)`, as is a file
    /// holding JSON `null`.
    pub fn read_history(&self) -> StoreResult<Option<Vec<Sale>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No ledger file");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io("read", &self.path, e)),
        };

        let sales: Option<Vec<Sale>> =
            serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            count = sales.as_ref().map_or(0, Vec::len),
            "Read ledger file"
        );
        Ok(sales)
    }

    /// Atomically replaces the file with `sales`.
    pub fn write_history(&self, sales: &[Sale]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(sales).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::io("create directory", parent, e))?;
        }

        let temp_path = self.temp_path();
        let mut file =
            File::create(&temp_path).map_err(|e| StoreError::io("create", &temp_path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| StoreError::io("write", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io("sync", &temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|source| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), count = sales.len(), "Saved sales history");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| LEDGER_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self) -> Result<Option<Vec<Sale>>, PersistenceError> {
        self.read_history()
            .map_err(|e| PersistenceError::load_failed(e.to_string()))
    }

    fn save(&mut self, sales: &[Sale]) -> Result<(), PersistenceError> {
        self.write_history(sales)
            .map_err(|e| PersistenceError::save_failed(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{LineItem, Money, SaleId};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn sale(id: &str, items: &[(&str, i64, u32)]) -> Sale {
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

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonLedgerStore::in_dir(dir.path());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_null_document_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonLedgerStore::in_dir(dir.path());
        fs::write(store.path(), "null").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let mut store = JsonLedgerStore::in_dir(dir.path());
        let sales = vec![
            sale("3F2A9C1B", &[("Milk", 250, 3), ("Bread", 120, 2)]),
            sale("0A1B2C3D", &[("Eggs", 399, 1)]),
        ];

        store.save(&sales).unwrap();

        assert_eq!(store.load().unwrap(), Some(sales));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_file_is_readable_json() {
        let dir = tempdir().unwrap();
        let mut store = JsonLedgerStore::in_dir(dir.path());
        store.save(&[sale("3F2A9C1B", &[("Milk", 250, 3)])]).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"createdAt\": \"2024-05-01T09:30:00Z\""));
        assert!(text.contains("\"unitPrice\": \"2.50\""));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_reads_numeric_prices() {
        let dir = tempdir().unwrap();
        let store = JsonLedgerStore::in_dir(dir.path());
        fs::write(
            store.path(),
            r#"[{"id":"AB12CD34","createdAt":"2024-05-01T09:30:00Z",
                "items":[{"name":"Milk","unitPrice":2.5,"quantity":3}]}]"#,
        )
        .unwrap();

        let sales = store.load().unwrap().unwrap();
        assert_eq!(sales[0].total().cents(), 750);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let mut store = JsonLedgerStore::new(dir.path().join("till/data/sales.json"));
        store.save(&[]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let dir = tempdir().unwrap();
        let store = JsonLedgerStore::in_dir(dir.path());
        fs::write(store.path(), "[{\"id\": ").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistenceError::LoadFailed { .. }));
        assert!(err.to_string().starts_with("Failed to load sales history: "));
    }

    #[test]
    fn test_invalid_line_item_is_load_error() {
        let dir = tempdir().unwrap();
        let store = JsonLedgerStore::in_dir(dir.path());
        fs::write(
            store.path(),
            r#"[{"id":"AB12CD34","createdAt":"2024-05-01T09:30:00Z",
                "items":[{"name":"Milk","unitPrice":"2.50","quantity":0}]}]"#,
        )
        .unwrap();

        assert!(matches!(
            store.read_history(),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn test_save_into_unwritable_location_fails() {
        let dir = tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut store = JsonLedgerStore::new(blocker.join(LEDGER_FILE_NAME));

        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, PersistenceError::SaveFailed { .. }));
    }

    fn arb_sale() -> impl Strategy<Value = Sale> {
        (
            "[0-9A-F]{8}",
            0i64..4_000_000_000,
            prop::collection::vec(("[A-Za-z][A-Za-z ]{0,20}[a-z]", 1i64..100_000, 1u32..1000), 0..6),
        )
            .prop_map(|(id, secs, items)| {
                let mut sale = Sale::new(SaleId::new(id), Utc.timestamp_opt(secs, 0).unwrap());
                for (name, cents, qty) in items {
                    let item = LineItem::new(&name, Money::from_cents(cents), qty).unwrap();
                    sale.add_item(item).unwrap();
                }
                sale
            })
    }

    proptest! {
        #[test]
        fn prop_save_load_save_is_stable(sales in prop::collection::vec(arb_sale(), 0..5)) {
            let dir = tempdir().unwrap();
            let mut store = JsonLedgerStore::in_dir(dir.path());

            store.save(&sales).unwrap();
            let first = fs::read_to_string(store.path()).unwrap();
            let loaded = store.load().unwrap().unwrap();
            store.save(&loaded).unwrap();
            let second = fs::read_to_string(store.path()).unwrap();

            prop_assert_eq!(&loaded, &sales);
            prop_assert_eq!(first, second);
        }
    }
}
