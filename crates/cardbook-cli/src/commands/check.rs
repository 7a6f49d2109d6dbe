use crate::app::AppContext;
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let store = ledger.store();
    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                let metadata = store.metadata()?;
                println!("Integrity check: OK");
                println!("- sqlite pages: OK");
                println!("- quantities positive: OK");
                println!("- canonical keys: OK");
                println!(
                    "- {} cards, format {}, created {}",
                    metadata.entry_count,
                    metadata.format_version,
                    metadata.created_at.format("%Y-%m-%d")
                );
            }
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            eprintln!("Hint: Export what is readable and rebuild the ledger with `cardbook import`.");
            return Err(CliError::IntegrityFailed("Integrity check failed".to_string()).into());
        }
    }
    Ok(())
}
