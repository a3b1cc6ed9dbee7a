//! Expense store for JSON storage
//!
//! Bulk-loads and bulk-replaces the expense collection held in a single
//! backing document. Every store opened on the same document within the
//! process shares one mutex, so a caller holding [`ExpenseStore::lock`] has
//! exclusive use of the document for a full load-modify-save cycle.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::debug;

use crate::error::ExpenseError;
use crate::models::Expense;

use super::file_io::{read_json_required, write_json_atomic};

type DocumentLocks = Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

/// Process-wide registry of per-document locks
fn document_locks() -> &'static DocumentLocks {
    static LOCKS: OnceLock<DocumentLocks> = OnceLock::new();
    LOCKS.get_or_init(Default::default)
}

/// Resolve the key a document is locked under.
///
/// The document may not exist yet, so the parent directory is canonicalized
/// when possible and the file name appended.
fn lock_key(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    let mut locks = document_locks()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    locks.entry(lock_key(path)).or_default().clone()
}

/// Gateway to the backing document
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl ExpenseStore {
    /// Open a store on the given document path
    pub fn new(path: PathBuf) -> Self {
        let lock = lock_for(&path);
        Self { path, lock }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire exclusive use of the backing document.
    ///
    /// The guarded value is `()`, so a poisoned lock carries no broken state
    /// and is simply taken over.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the whole collection in stored order
    pub fn load(&self) -> Result<Vec<Expense>, ExpenseError> {
        let expenses: Vec<Expense> = read_json_required(&self.path)?;
        debug!(path = %self.path.display(), count = expenses.len(), "loaded expenses");
        Ok(expenses)
    }

    /// Replace the whole collection, returning what was written
    pub fn save(&self, expenses: Vec<Expense>) -> Result<Vec<Expense>, ExpenseError> {
        write_json_atomic(&self.path, &expenses)?;
        debug!(path = %self.path.display(), count = expenses.len(), "saved expenses");
        Ok(expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expense.json");
        let store = ExpenseStore::new(path);
        (temp_dir, store)
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::with_date(
                ExpenseId::new(1),
                "coffee",
                5.0,
                "food",
                Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap(),
            ),
            Expense::with_date(
                ExpenseId::new(2),
                "bus",
                2.5,
                "travel",
                Utc.with_ymd_and_hms(2025, 1, 11, 18, 0, 0).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_load_missing_document_fails() {
        let (_temp_dir, store) = create_test_store();
        let err = store.load().unwrap_err();
        assert!(matches!(err, ExpenseError::StorageRead(_)));
    }

    #[test]
    fn test_load_malformed_document_fails() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.path(), "{ not an array").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, ExpenseError::StorageRead(_)));
    }

    #[test]
    fn test_save_returns_written_collection() {
        let (_temp_dir, store) = create_test_store();
        let written = store.save(sample()).unwrap();
        assert_eq!(written, sample());
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let (_temp_dir, store) = create_test_store();
        store.save(sample()).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let loaded = store.load().unwrap();
        store.save(loaded.clone()).unwrap();
        let after = fs::read_to_string(store.path()).unwrap();

        assert_eq!(loaded, sample());
        assert_eq!(before, after);
    }

    #[test]
    fn test_stores_on_same_document_share_lock() {
        let (_temp_dir, store) = create_test_store();
        store.save(Vec::new()).unwrap();
        let other = ExpenseStore::new(store.path().to_path_buf());

        let _guard = store.lock();
        assert!(other.lock.try_lock().is_err());
    }

    #[test]
    fn test_stores_on_different_documents_do_not_share_lock() {
        let (_temp_dir, store) = create_test_store();
        let (_other_dir, other) = create_test_store();

        let _guard = store.lock();
        assert!(other.lock.try_lock().is_ok());
    }
}
