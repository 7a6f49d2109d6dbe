//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored card: canonical name and a quantity that is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Canonical (trimmed, lower-case) card name
    pub name: String,

    /// Number of copies held
    pub quantity: i64,
}

impl LedgerEntry {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Metadata for a ledger file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerMetadata {
    /// Format version (e.g., "0.1")
    pub format_version: String,

    /// When this ledger was created
    pub created_at: DateTime<Utc>,

    /// Number of distinct cards stored
    pub entry_count: usize,
}

/// Canonical form of a card name used as the ledger key.
///
/// Keys compare case-insensitively, so "Island", " island" and "ISLAND" all
/// address the same entry.
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_folds_case_and_whitespace() {
        assert_eq!(canonical_key("Island"), "island");
        assert_eq!(canonical_key("  Sol Ring "), "sol ring");
        assert_eq!(canonical_key("ÆTHER VIAL"), "æther vial");
    }
}
