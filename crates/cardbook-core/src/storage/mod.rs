//! Storage layer for the card ledger.
//!
//! The engine only talks to the [`LedgerStore`] trait. Two backends ship with
//! the crate: a SQLite file (the persisted ledger) and an in-memory map.

mod memory;
mod sqlite;
mod traits;
mod types;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::LedgerStore;
pub use types::{canonical_key, LedgerEntry, LedgerMetadata};
