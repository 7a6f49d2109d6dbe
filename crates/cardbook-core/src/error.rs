//! Error types for Cardbook core operations.
//!
//! Errors are descriptive at the core level; the `reply` module maps them to
//! the fixed user-facing lines the command layer relays.

use thiserror::Error;

/// Result type alias for Cardbook operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Core error type for ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A line lacks the `,` delimiter or has an empty name
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The quantity field is not an acceptable integer
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The named card is not in the ledger
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import or conversion input could not be read
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    /// True for errors produced while parsing a `name,quantity` record.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            LedgerError::MalformedRecord(_) | LedgerError::InvalidQuantity(_)
        )
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        LedgerError::Storage(format!("SQLite error: {}", err))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::InvalidInput(format!("CSV error: {}", err))
    }
}
