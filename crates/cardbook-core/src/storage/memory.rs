//! In-memory storage backend for tests, dry runs, and embedding.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::traits::LedgerStore;
use super::types::{canonical_key, LedgerEntry};
use crate::error::{LedgerError, Result};

/// Map-backed ledger. Scans enumerate in key order.
#[derive(Default)]
pub struct MemoryStore {
    cards: RwLock<BTreeMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with `(name, quantity)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidQuantity` if any quantity is `<= 0`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, i64)>) -> Result<Self> {
        let store = Self::new();
        for (name, quantity) in entries {
            store.upsert(name, quantity)?;
        }
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, i64>>> {
        self.cards
            .read()
            .map_err(|_| LedgerError::Storage("Memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, i64>>> {
        self.cards
            .write()
            .map_err(|_| LedgerError::Storage("Memory store lock poisoned".to_string()))
    }
}

impl LedgerStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.read()?.get(&canonical_key(key)).copied())
    }

    fn upsert(&self, key: &str, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(format!(
                "refusing to store quantity {} for {:?}",
                quantity, key
            )));
        }
        self.write()?.insert(canonical_key(key), quantity);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.write()?.remove(&canonical_key(key)).is_some())
    }

    fn scan_contains(&self, substring: &str) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .read()?
            .iter()
            .filter(|(name, _)| name.contains(substring))
            .map(|(name, quantity)| LedgerEntry::new(name.clone(), *quantity))
            .collect())
    }

    fn scan_all(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .read()?
            .iter()
            .map(|(name, quantity)| LedgerEntry::new(name.clone(), *quantity))
            .collect())
    }
}
