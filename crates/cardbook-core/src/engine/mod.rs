//! The ledger reconciliation engine.
//!
//! `Ledger` applies textual `name,quantity` input to a [`LedgerStore`]. Every
//! read-compute-write cycle runs under a single writer lock so two callers
//! sharing a `Ledger` cannot lose each other's updates. Block operations
//! commit line by line; a bad line is skipped and never rolls back earlier
//! lines.

mod outcome;

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

pub use outcome::{
    AddOutcome, AppliedChange, BlockChange, BlockKind, BlockReport, Snapshot, SubtractOutcome,
};

use crate::error::{LedgerError, Result};
use crate::record::{parse_block, parse_record, InputRecord, LineFailure};
use crate::storage::{LedgerEntry, LedgerStore};

/// How diff-reconcile stores an existing card's new quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// Store `target - current` (deleting when that is `<= 0`). The report
    /// still shows the target.
    #[default]
    Delta,

    /// Store the target itself (deleting when it is 0).
    Target,
}

/// Reconciliation engine over a card store.
pub struct Ledger<S: LedgerStore> {
    store: S,
    writer: Mutex<()>,
    diff_mode: DiffMode,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
            diff_mode: DiffMode::default(),
        }
    }

    /// Select the diff-reconcile storage rule.
    pub fn with_diff_mode(mut self, diff_mode: DiffMode) -> Self {
        self.diff_mode = diff_mode;
        self
    }

    pub fn diff_mode(&self) -> DiffMode {
        self.diff_mode
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the engine, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|_| LedgerError::Storage("Ledger writer lock poisoned".to_string()))
    }

    /// Add one `name,quantity` record, merging into any existing quantity.
    pub fn add(&self, input: &str) -> Result<AddOutcome> {
        self.add_record(parse_record(input)?)
    }

    /// Merge an already-parsed record.
    pub fn add_record(&self, record: InputRecord) -> Result<AddOutcome> {
        let record = record.require_positive()?;
        let _guard = self.lock_writer()?;
        self.merge(&record)
    }

    /// Subtract one `name,quantity` record; the card is removed once it
    /// reaches zero. A zero or negative amount leaves the card in place.
    pub fn subtract(&self, input: &str) -> Result<SubtractOutcome> {
        let record = parse_record(input)?;
        let _guard = self.lock_writer()?;
        self.take(&record)
    }

    /// Merge every line of `block` into the ledger.
    pub fn add_block(&self, block: &str) -> Result<BlockReport> {
        self.apply_block(BlockKind::Add, block, |record| {
            let record = record.require_positive()?;
            let change = match self.merge(&record)? {
                AddOutcome::Added { name, .. } => BlockChange::Added {
                    name,
                    quantity: record.quantity.to_string(),
                },
                AddOutcome::Updated {
                    name,
                    previous,
                    current,
                } => BlockChange::Merged {
                    name,
                    previous,
                    current,
                },
            };
            Ok(Some(change))
        })
    }

    /// Subtract every line of `block`. Lines naming absent cards are skipped.
    pub fn subtract_block(&self, block: &str) -> Result<BlockReport> {
        self.apply_block(BlockKind::Subtract, block, |record| {
            match self.take(&record)? {
                SubtractOutcome::Missing { name } => Err(LedgerError::NotFound(name)),
                SubtractOutcome::Updated { name, .. } | SubtractOutcome::Removed { name } => {
                    Ok(Some(BlockChange::Removed {
                        name,
                        quantity: record.quantity,
                    }))
                }
            }
        })
    }

    /// Reconcile the ledger toward the target quantities in `block`.
    pub fn diff_block(&self, block: &str) -> Result<BlockReport> {
        self.apply_block(BlockKind::Diff, block, |record| self.reconcile(&record))
    }

    /// Report how many copies are still needed for each line of `block`.
    ///
    /// Read-only: cards absent from the ledger are skipped.
    pub fn compare_block(&self, block: &str) -> Result<BlockReport> {
        let mut report = BlockReport::new(BlockKind::Compare);
        for line in parse_block(block) {
            let outcome = line.record.and_then(|record| {
                let current = match self.store.get(&record.key())? {
                    Some(current) => current,
                    None => return Ok(None),
                };
                let needed = record.quantity.saturating_sub(current).max(0);
                Ok(Some(BlockChange::Shortfall {
                    name: record.name,
                    needed,
                }))
            });
            Self::record_line(&mut report, line.number, line.text, outcome);
        }
        Ok(report)
    }

    /// Entries whose stored name contains `substring` (case-sensitive).
    ///
    /// An empty substring matches nothing.
    pub fn search(&self, substring: &str) -> Result<Vec<LedgerEntry>> {
        if substring.is_empty() {
            return Ok(Vec::new());
        }
        self.store.scan_contains(substring)
    }

    /// Dump the whole ledger.
    pub fn export(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            entries: self.store.scan_all()?,
        })
    }

    fn merge(&self, record: &InputRecord) -> Result<AddOutcome> {
        let key = record.key();
        match self.store.get(&key)? {
            Some(previous) => {
                let current = previous.checked_add(record.quantity).ok_or_else(|| {
                    LedgerError::InvalidQuantity(format!(
                        "adding {} to {} overflows",
                        record.quantity, previous
                    ))
                })?;
                self.store.upsert(&key, current)?;
                tracing::debug!(card = %key, previous, current, "merged card");
                Ok(AddOutcome::Updated {
                    name: record.name.clone(),
                    previous,
                    current,
                })
            }
            None => {
                self.store.upsert(&key, record.quantity)?;
                tracing::debug!(card = %key, quantity = record.quantity, "added card");
                Ok(AddOutcome::Added {
                    name: record.name.clone(),
                    quantity: record.quantity,
                })
            }
        }
    }

    fn take(&self, record: &InputRecord) -> Result<SubtractOutcome> {
        let key = record.key();
        let previous = match self.store.get(&key)? {
            Some(previous) => previous,
            None => {
                return Ok(SubtractOutcome::Missing {
                    name: record.name.clone(),
                })
            }
        };

        let current = previous.checked_sub(record.quantity).ok_or_else(|| {
            LedgerError::InvalidQuantity(format!(
                "subtracting {} from {} overflows",
                record.quantity, previous
            ))
        })?;
        if current > 0 {
            self.store.upsert(&key, current)?;
            tracing::debug!(card = %key, previous, current, "subtracted card");
            Ok(SubtractOutcome::Updated {
                name: record.name.clone(),
                previous,
                current,
            })
        } else {
            self.store.delete(&key)?;
            tracing::debug!(card = %key, previous, "removed card");
            Ok(SubtractOutcome::Removed {
                name: record.name.clone(),
            })
        }
    }

    fn reconcile(&self, record: &InputRecord) -> Result<Option<BlockChange>> {
        let key = record.key();
        let target = record.quantity;

        let previous = match self.store.get(&key)? {
            Some(previous) => previous,
            None if target > 0 => {
                self.store.upsert(&key, target)?;
                tracing::debug!(card = %key, target, "reconcile added card");
                return Ok(Some(BlockChange::Added {
                    name: record.name.clone(),
                    quantity: record.quantity_text.clone(),
                }));
            }
            None => return Ok(None),
        };

        let stored = match self.diff_mode {
            DiffMode::Delta => target.saturating_sub(previous),
            DiffMode::Target => target,
        };
        if stored > 0 {
            self.store.upsert(&key, stored)?;
        } else {
            self.store.delete(&key)?;
        }
        tracing::debug!(card = %key, previous, target, stored, mode = ?self.diff_mode, "reconciled card");

        Ok(Some(BlockChange::Reconciled {
            name: record.name.clone(),
            previous,
            target: record.quantity_text.clone(),
        }))
    }

    fn apply_block<F>(&self, kind: BlockKind, block: &str, mut apply: F) -> Result<BlockReport>
    where
        F: FnMut(InputRecord) -> Result<Option<BlockChange>>,
    {
        let mut report = BlockReport::new(kind);
        for line in parse_block(block) {
            let outcome = match line.record {
                Ok(record) => {
                    let _guard = self.lock_writer()?;
                    apply(record)
                }
                Err(err) => Err(err),
            };
            Self::record_line(&mut report, line.number, line.text, outcome);
        }
        tracing::debug!(
            kind = ?kind,
            applied = report.changes.len(),
            skipped = report.skipped.len(),
            "block applied"
        );
        Ok(report)
    }

    fn record_line(
        report: &mut BlockReport,
        number: usize,
        text: String,
        outcome: Result<Option<BlockChange>>,
    ) {
        match outcome {
            Ok(Some(change)) => report.changes.push(AppliedChange { number, change }),
            Ok(None) => {}
            Err(error) => {
                match &error {
                    LedgerError::NotFound(_) => {
                        tracing::debug!(line = number, %error, "block line skipped")
                    }
                    _ => tracing::warn!(line = number, %error, "block line skipped"),
                }
                report.skipped.push(LineFailure {
                    number,
                    text,
                    error,
                });
            }
        }
    }
}
