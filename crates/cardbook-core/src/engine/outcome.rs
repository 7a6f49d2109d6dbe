//! Typed results of ledger operations.
//!
//! Each outcome renders (via `Display`) to the exact line the command layer
//! relays to the user. Single-record and block operations use different
//! quoting, so they are separate types.

use std::fmt;

use serde::Serialize;

use crate::record::LineFailure;
use crate::storage::LedgerEntry;

/// Result of a single-record add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddOutcome {
    Added {
        name: String,
        quantity: i64,
    },
    Updated {
        name: String,
        previous: i64,
        current: i64,
    },
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddOutcome::Added { name, quantity } => {
                write!(f, "Added '{}' with quantity {}", name, quantity)
            }
            AddOutcome::Updated {
                name,
                previous,
                current,
            } => write!(f, "Updated '{}': quantity {} -> {}", name, previous, current),
        }
    }
}

/// Result of a single-record subtract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubtractOutcome {
    Missing {
        name: String,
    },
    Updated {
        name: String,
        previous: i64,
        current: i64,
    },
    Removed {
        name: String,
    },
}

impl fmt::Display for SubtractOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtractOutcome::Missing { name } => {
                write!(f, "No record found for '{}' to subtract the quantity.", name)
            }
            SubtractOutcome::Updated {
                name,
                previous,
                current,
            } => write!(f, "Updated {}: quantity {} -> {}", name, previous, current),
            SubtractOutcome::Removed { name } => write!(f, "Removed {}", name),
        }
    }
}

/// Which block operation produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Add,
    Subtract,
    Diff,
    Compare,
}

impl BlockKind {
    /// Line returned when nothing in the block applied.
    pub fn empty_message(self) -> &'static str {
        match self {
            BlockKind::Add => "No cards added.",
            BlockKind::Subtract => "No cards removed.",
            BlockKind::Diff => "No differences added.",
            BlockKind::Compare => "No matches found.",
        }
    }
}

/// One applied line of a block operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockChange {
    /// New card inserted (add or diff)
    Added { name: String, quantity: String },

    /// Existing card merged with the supplied amount
    Merged {
        name: String,
        previous: i64,
        current: i64,
    },

    /// Amount subtracted from an existing card (the card may be gone afterwards)
    Removed { name: String, quantity: i64 },

    /// Existing card reconciled toward a target
    Reconciled {
        name: String,
        previous: i64,
        target: String,
    },

    /// Copies still missing to reach a required quantity
    Shortfall { name: String, needed: i64 },
}

impl fmt::Display for BlockChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockChange::Added { name, quantity } => {
                write!(f, "Added \"{}\": quantity {}", name, quantity)
            }
            BlockChange::Merged {
                name,
                previous,
                current,
            } => write!(f, "Updated \"{}\": quantity {} -> {}", name, previous, current),
            BlockChange::Removed { name, quantity } => {
                write!(f, "Removed \"{}\": quantity {}", name, quantity)
            }
            BlockChange::Reconciled {
                name,
                previous,
                target,
            } => write!(f, "Updated \"{}\": quantity {} -> {}", name, previous, target),
            BlockChange::Shortfall { name, needed } => {
                write!(f, "Found \"{}\": you need {}", name, needed)
            }
        }
    }
}

/// A block change and the 1-based input line that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    pub number: usize,
    pub change: BlockChange,
}

impl fmt::Display for AppliedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.change.fmt(f)
    }
}

/// Everything a block operation did. Both lists are in input order.
#[derive(Debug)]
pub struct BlockReport {
    pub kind: BlockKind,
    pub changes: Vec<AppliedChange>,
    pub skipped: Vec<LineFailure>,
}

impl BlockReport {
    pub(crate) fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            changes: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// True when no line of the block applied.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Full ledger dump as `name,quantity` lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub entries: Vec<LedgerEntry>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `name,quantity` line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{},{}", entry.name, entry.quantity))
            .collect()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
