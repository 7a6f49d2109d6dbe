//! Application context for the Cardbook CLI.
//!
//! Bundles the parsed CLI arguments with the config file, which is loaded
//! lazily and at most once per invocation.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use cardbook_core::storage::SqliteStore;
use cardbook_core::{DiffMode, Ledger};

use crate::cli::Cli;
use crate::config::{default_ledger_path, read_config, AccessSection, CardbookConfig};
use crate::errors::CliError;

use super::resolver::{missing_ledger_message, resolve_config_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<CardbookConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Check if replies should be printed as JSON.
    pub fn json(&self) -> bool {
        self.cli.json
    }

    /// The config file, if one exists.
    pub fn config(&self) -> anyhow::Result<Option<&CardbookConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok::<_, anyhow::Error>(None);
            }
            tracing::debug!(path = %path.display(), "loading config");
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Ledger path: `--ledger`/`CARDBOOK_PATH`, then config, then the XDG default.
    pub fn ledger_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.ledger.as_ref() {
            return Ok(PathBuf::from(path));
        }
        if let Some(config) = self.config()? {
            return Ok(PathBuf::from(&config.ledger.path));
        }
        default_ledger_path()
    }

    /// Chat allow-list from config (everyone when unset).
    pub fn access(&self) -> anyhow::Result<AccessSection> {
        Ok(self
            .config()?
            .map(|config| config.access.clone())
            .unwrap_or_default())
    }

    pub fn diff_mode(&self) -> anyhow::Result<DiffMode> {
        Ok(self
            .config()?
            .map(|config| config.reconcile.diff_mode)
            .unwrap_or_default())
    }

    /// Open the ledger engine over the resolved SQLite file.
    pub fn open_ledger(&self) -> anyhow::Result<Ledger<SqliteStore>> {
        let path = self.ledger_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                missing_ledger_message(&path),
                "Hint: Pass --ledger or set CARDBOOK_PATH to use an existing ledger.",
            )
            .into());
        }
        let store = SqliteStore::open(&path)?;
        Ok(Ledger::new(store).with_diff_mode(self.diff_mode()?))
    }
}
