use std::fs::File;
use std::path::Path;

use cardbook_core::import::import_csv;

use crate::app::AppContext;
use crate::cli::ImportArgs;
use crate::errors::CliError;
use crate::output::print_status;

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.file);
    if !path.exists() {
        return Err(CliError::not_found(
            format!("CSV file not found: {}", path.display()),
            "Hint: The CSV needs a header row followed by name,quantity rows.",
        )
        .into());
    }

    let ledger = ctx.open_ledger()?;
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?;
    let summary = import_csv(&ledger, file)?;

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&summary.counts())?);
        return Ok(());
    }

    for failure in &summary.skipped {
        eprintln!(
            "Skipped line {} ({}): {}",
            failure.number, failure.text, failure.error
        );
    }
    print_status(
        ctx,
        &format!(
            "Imported {} rows ({} skipped) from {}",
            summary.imported,
            summary.skipped.len(),
            path.display()
        ),
    );
    Ok(())
}
