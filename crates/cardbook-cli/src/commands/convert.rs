use std::path::Path;

use cardbook_core::convert::convert_deck_list;
use cardbook_core::fs::write_atomic;

use crate::app::AppContext;
use crate::cli::ConvertArgs;
use crate::input::read_input;
use crate::output::print_status;

/// Rewrite a deck list; needs no ledger.
pub fn handle_convert(ctx: &AppContext, args: &ConvertArgs) -> anyhow::Result<()> {
    let text = read_input(Some(&args.input))?;
    let conversion = convert_deck_list(&text);
    if conversion.dropped > 0 {
        tracing::info!(dropped = conversion.dropped, "dropped lines without a count");
    }

    match args.output.as_ref() {
        Some(output) => {
            let path = Path::new(output);
            write_atomic(path, conversion.to_string().as_bytes())
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
            print_status(
                ctx,
                &format!(
                    "Converted {} lines to {}",
                    conversion.lines.len(),
                    path.display()
                ),
            );
        }
        None => {
            for line in &conversion.lines {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
