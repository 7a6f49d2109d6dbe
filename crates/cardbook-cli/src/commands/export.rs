use std::path::Path;

use cardbook_core::fs::write_atomic;
use cardbook_core::Reply;

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::output::{print_reply, print_status};

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let snapshot = ledger.export();

    let Some(output) = args.output.as_ref() else {
        return print_reply(ctx, &Reply::export(snapshot));
    };

    let snapshot = snapshot?;
    if snapshot.is_empty() {
        return print_reply(ctx, &Reply::export(Ok(snapshot)));
    }

    let mut contents = snapshot.to_string();
    contents.push('\n');
    let path = Path::new(output);
    write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;

    print_status(
        ctx,
        &format!(
            "Exported {} cards to {}",
            snapshot.entries.len(),
            path.display()
        ),
    );
    Ok(())
}
