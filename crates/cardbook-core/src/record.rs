//! `name,quantity` record parsing.
//!
//! A record is one line split on its first comma. Everything after that comma
//! is the quantity field, so card names may not contain commas but the
//! quantity may carry surrounding whitespace (`island, 4`).

use crate::error::{LedgerError, Result};
use crate::storage::canonical_key;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// Name exactly as supplied (untrimmed, original casing)
    pub name: String,

    /// Quantity field after trimming, as supplied
    pub quantity_text: String,

    /// Parsed quantity, any integer
    pub quantity: i64,
}

impl InputRecord {
    /// Canonical ledger key for this record's name.
    pub fn key(&self) -> String {
        canonical_key(&self.name)
    }

    /// Reject zero and negative quantities where the amount becomes a stored
    /// quantity (add, and inserts).
    pub fn require_positive(self) -> Result<Self> {
        if self.quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(format!(
                "quantity must be greater than zero, got {}",
                self.quantity_text
            )));
        }
        Ok(self)
    }

    /// Validate an already-split name and quantity field.
    pub fn from_parts(name: &str, quantity_raw: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(LedgerError::MalformedRecord(
                "the name part of the record is empty".to_string(),
            ));
        }

        let quantity_text = quantity_raw.trim();
        let quantity: i64 = quantity_text.parse().map_err(|_| {
            LedgerError::InvalidQuantity(format!("{:?} is not an integer", quantity_text))
        })?;

        Ok(InputRecord {
            name: name.to_string(),
            quantity_text: quantity_text.to_string(),
            quantity,
        })
    }
}

/// Parse a single `name,quantity` line.
///
/// # Errors
///
/// - `MalformedRecord` if there is no comma or the name is blank
/// - `InvalidQuantity` if the quantity is not a base-10 integer
pub fn parse_record(line: &str) -> Result<InputRecord> {
    let (name, quantity_raw) = line.split_once(',').ok_or_else(|| {
        LedgerError::MalformedRecord(format!("missing ',' delimiter in {:?}", line))
    })?;
    InputRecord::from_parts(name, quantity_raw)
}

/// One line of a block together with its parse result.
#[derive(Debug)]
pub struct BlockLine {
    /// 1-based line number within the block
    pub number: usize,

    /// Raw line text (carriage returns removed)
    pub text: String,

    pub record: Result<InputRecord>,
}

/// A block line that was skipped because it failed to parse or apply.
#[derive(Debug)]
pub struct LineFailure {
    pub number: usize,
    pub text: String,
    pub error: LedgerError,
}

/// Split a block into parsed lines, in input order.
///
/// Carriage returns are stripped before splitting so Windows line endings
/// behave like Unix ones. Whitespace-only lines are dropped.
pub fn parse_block(text: &str) -> Vec<BlockLine> {
    let normalized = text.replace('\r', "");
    normalized
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| BlockLine {
            number: index + 1,
            text: line.to_string(),
            record: parse_record(line),
        })
        .collect()
}
