//! One-time CSV import into the ledger.
//!
//! The CSV has a header row followed by `name,quantity` rows. Names may be
//! quoted (card names can contain commas), which is why this goes through a
//! real CSV reader instead of the block parser. Rows merge additively, so
//! duplicate rows for the same card sum up.

use std::io::Read;

use serde::Serialize;

use crate::engine::Ledger;
use crate::error::{LedgerError, Result};
use crate::record::{InputRecord, LineFailure};
use crate::storage::LedgerStore;

/// What an import did.
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Rows merged into the ledger
    pub imported: usize,

    /// Rows that could not be imported
    pub skipped: Vec<LineFailure>,
}

/// Serializable view of an import, for JSON output.
#[derive(Debug, Serialize)]
pub struct ImportCounts {
    pub imported: usize,
    pub skipped: usize,
}

impl ImportSummary {
    pub fn counts(&self) -> ImportCounts {
        ImportCounts {
            imported: self.imported,
            skipped: self.skipped.len(),
        }
    }
}

/// Import every data row of a CSV into `ledger`.
///
/// # Errors
///
/// Returns `LedgerError::InvalidInput` if the CSV itself cannot be read
/// (bad UTF-8, I/O failure). Individual bad rows are skipped and reported in
/// the summary.
pub fn import_csv<S, R>(ledger: &Ledger<S>, reader: R) -> Result<ImportSummary>
where
    S: LedgerStore,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let mut summary = ImportSummary::default();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        // Header is line 1.
        let number = row
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(index + 2);
        let text = row.iter().collect::<Vec<_>>().join(",");

        let outcome = match (row.get(0), row.get(1)) {
            (Some(name), Some(quantity)) => InputRecord::from_parts(name, quantity)
                .and_then(|record| ledger.add_record(record)),
            _ => Err(LedgerError::MalformedRecord(format!(
                "expected 2 columns, found {}",
                row.len()
            ))),
        };

        match outcome {
            Ok(_) => summary.imported += 1,
            Err(error) => {
                tracing::warn!(line = number, %error, "skipped CSV row");
                summary.skipped.push(LineFailure {
                    number,
                    text,
                    error,
                });
            }
        }
    }

    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped.len(),
        "CSV import finished"
    );
    Ok(summary)
}
