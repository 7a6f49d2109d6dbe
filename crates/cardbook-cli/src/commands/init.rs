use std::path::PathBuf;

use cardbook_core::storage::SqliteStore;
use cardbook_core::DiffMode;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::{Cli, InitArgs};
use crate::config::{default_ledger_path, write_config, CardbookConfig};
use crate::errors::CliError;
use crate::output::print_status;

pub fn handle_init(ctx: &AppContext, cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path.as_ref().or(cli.ledger.as_ref()) {
        Some(path) => PathBuf::from(path),
        None => default_ledger_path()?,
    };
    if target.exists() {
        return Err(CliError::invalid_input(format!(
            "A ledger already exists at {}",
            target.display()
        ))
        .into());
    }

    let store = SqliteStore::create(&target)?;
    let metadata = store.metadata()?;
    tracing::info!(
        path = %target.display(),
        format_version = %metadata.format_version,
        "initialized ledger"
    );

    let config_path = match args.config_path.as_ref() {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };
    if config_path.exists() {
        print_status(
            ctx,
            &format!(
                "Keeping existing config at {} (ledger path not updated)",
                config_path.display()
            ),
        );
    } else {
        let diff_mode: DiffMode = args.diff_mode.into();
        let config = CardbookConfig::new(target.clone(), args.authorized_users.clone(), diff_mode);
        write_config(&config_path, &config)?;
        print_status(ctx, &format!("Wrote config to {}", config_path.display()));
    }

    print_status(ctx, &format!("Initialized new ledger at {}", target.display()));
    Ok(())
}
