//! User-facing replies.
//!
//! Every engine result, success or failure, ends up here as a list of text
//! lines the command layer relays verbatim. Errors never escape past this
//! boundary.

use std::fmt;

use serde::Serialize;

use crate::engine::{BlockReport, Snapshot};
use crate::error::{LedgerError, Result};
use crate::storage::LedgerEntry;

/// Hint sent when a single `name,quantity` record cannot be parsed.
pub const FORMAT_HINT: &str = "An error occurred. Check your query format: [card,quantity]!";

/// Sentinel for a search with no hits.
pub const NO_RESULTS: &str = "No results...";

/// Sentinel for exporting an empty ledger.
pub const NO_INVENTORY: &str = "No inventory to write.";

/// Lines to send back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub lines: Vec<String>,
}

impl Reply {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    /// Reply for a single-record operation.
    pub fn single<T: fmt::Display>(result: Result<T>) -> Self {
        match result {
            Ok(outcome) => Self::line(outcome.to_string()),
            Err(err) => Self::from_error(&err),
        }
    }

    /// Reply for a block operation: one line per applied record with storage
    /// failures interleaved at their input line, or the operation's sentinel
    /// when nothing applied.
    pub fn block(result: Result<BlockReport>) -> Self {
        let report = match result {
            Ok(report) => report,
            Err(err) => return Self::from_error(&err),
        };

        let mut numbered: Vec<(usize, String)> = report
            .changes
            .iter()
            .map(|applied| (applied.number, applied.to_string()))
            .collect();
        numbered.extend(
            report
                .skipped
                .iter()
                .filter(|failure| matches!(failure.error, LedgerError::Storage(_)))
                .map(|failure| (failure.number, format!("An error occurred: {}", failure.error))),
        );
        if numbered.is_empty() {
            return Self::line(report.kind.empty_message());
        }
        numbered.sort_by_key(|(number, _)| *number);
        Self {
            lines: numbered.into_iter().map(|(_, line)| line).collect(),
        }
    }

    /// Reply for a substring search.
    pub fn search(result: Result<Vec<LedgerEntry>>) -> Self {
        match result {
            Ok(entries) if entries.is_empty() => Self::line(NO_RESULTS),
            Ok(entries) => Self {
                lines: entries
                    .iter()
                    .map(|entry| format!("Found {} -> you have {}", entry.name, entry.quantity))
                    .collect(),
            },
            Err(err) => Self::from_error(&err),
        }
    }

    /// Reply for a snapshot export.
    pub fn export(result: Result<Snapshot>) -> Self {
        match result {
            Ok(snapshot) if snapshot.is_empty() => Self::line(NO_INVENTORY),
            Ok(snapshot) => Self {
                lines: snapshot.lines(),
            },
            Err(err) => Self::from_error(&err),
        }
    }

    /// Map an error to its user-facing line.
    pub fn from_error(err: &LedgerError) -> Self {
        if err.is_parse_error() {
            tracing::debug!(error = %err, "rejected record");
            return Self::line(FORMAT_HINT);
        }
        tracing::warn!(error = %err, "operation failed");
        Self::line(format!("An error occurred: {}", err))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Ledger;
    use crate::storage::{LedgerStore, MemoryStore};

    /// Memory store whose writes fail for one key.
    struct FailingStore {
        inner: MemoryStore,
        broken_key: &'static str,
    }

    impl LedgerStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<i64>> {
            self.inner.get(key)
        }

        fn upsert(&self, key: &str, quantity: i64) -> Result<()> {
            if key == self.broken_key {
                return Err(LedgerError::Storage("disk full".into()));
            }
            self.inner.upsert(key, quantity)
        }

        fn delete(&self, key: &str) -> Result<bool> {
            self.inner.delete(key)
        }

        fn scan_contains(&self, substring: &str) -> Result<Vec<LedgerEntry>> {
            self.inner.scan_contains(substring)
        }

        fn scan_all(&self) -> Result<Vec<LedgerEntry>> {
            self.inner.scan_all()
        }
    }

    #[test]
    fn test_block_storage_failure_keeps_input_order() {
        let ledger = Ledger::new(FailingStore {
            inner: MemoryStore::new(),
            broken_key: "swamp",
        });

        let reply = Reply::block(ledger.add_block("island,2
bogus
swamp,1
forest,3"));

        assert_eq!(
            reply.lines,
            vec![
                "Added \"island\": quantity 2",
                "An error occurred: Storage error: disk full",
                "Added \"forest\": quantity 3",
            ]
        );
    }

    #[test]
    fn test_single_parse_error_uses_format_hint() {
        let ledger = Ledger::new(MemoryStore::new());
        let reply = Reply::single(ledger.add("island"));
        assert_eq!(reply.lines, vec![FORMAT_HINT]);
    }

    #[test]
    fn test_storage_error_is_generic_failure() {
        let reply = Reply::single::<String>(Err(LedgerError::Storage("disk full".into())));
        assert_eq!(reply.lines, vec!["An error occurred: Storage error: disk full"]);
    }

    #[test]
    fn test_block_sentinels() {
        let ledger = Ledger::new(MemoryStore::new());
        assert_eq!(
            Reply::block(ledger.add_block("garbage")).lines,
            vec!["No cards added."]
        );
        assert_eq!(
            Reply::block(ledger.subtract_block("island,1")).lines,
            vec!["No cards removed."]
        );
        assert_eq!(
            Reply::block(ledger.diff_block("")).lines,
            vec!["No differences added."]
        );
        assert_eq!(
            Reply::block(ledger.compare_block("island,1")).lines,
            vec!["No matches found."]
        );
    }

    #[test]
    fn test_search_and_export_sentinels() {
        let ledger = Ledger::new(MemoryStore::new());
        assert_eq!(Reply::search(ledger.search("isl")).lines, vec![NO_RESULTS]);
        assert_eq!(Reply::export(ledger.export()).lines, vec![NO_INVENTORY]);

        ledger.add("Island,2").unwrap();
        assert_eq!(
            Reply::search(ledger.search("isl")).lines,
            vec!["Found island -> you have 2"]
        );
        assert_eq!(Reply::export(ledger.export()).to_string(), "island,2");
    }
}
