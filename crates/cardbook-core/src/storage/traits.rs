//! Storage trait definition.
//!
//! `LedgerStore` is the parameterized interface between the engine and the
//! persisted ledger. Implementations take `&self` and handle their own
//! interior locking so a store can be shared across threads.

use super::types::LedgerEntry;
use crate::error::Result;

/// Keyed name → quantity store.
///
/// All implementations must ensure:
/// - Keys are canonicalized with [`canonical_key`](super::canonical_key), so
///   lookups are case-insensitive
/// - No entry is ever stored with a quantity `<= 0`
/// - Scans enumerate in a stable order
pub trait LedgerStore: Send + Sync {
    /// Current quantity for `key`, or `None` when the card is absent.
    fn get(&self, key: &str) -> Result<Option<i64>>;

    /// Insert or overwrite the quantity for `key`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidQuantity` if `quantity <= 0`.
    fn upsert(&self, key: &str, quantity: i64) -> Result<()>;

    /// Remove `key`. Returns whether an entry was removed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Entries whose stored name contains `substring` (case-sensitive).
    fn scan_contains(&self, substring: &str) -> Result<Vec<LedgerEntry>>;

    /// Every stored entry.
    fn scan_all(&self) -> Result<Vec<LedgerEntry>>;
}
