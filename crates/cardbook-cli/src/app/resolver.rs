//! Path resolution for config and ledger files.

use std::path::{Path, PathBuf};

use crate::config::default_config_path;

/// Resolve the config file path, checking CARDBOOK_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("CARDBOOK_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Error message when the ledger file is missing.
pub fn missing_ledger_message(path: &Path) -> String {
    format!(
        "No ledger found at {}\n\nRun:\n  cardbook init\n\nOr specify a ledger path:\n  CARDBOOK_PATH=/path/to/cards.db cardbook init",
        path.display()
    )
}
