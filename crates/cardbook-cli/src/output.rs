//! Output formatting helpers for the CLI.

use cardbook_core::Reply;

use crate::app::AppContext;

/// Print reply lines, or a `{"lines": [...]}` object with `--json`.
pub fn print_reply(ctx: &AppContext, reply: &Reply) -> anyhow::Result<()> {
    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }
    for line in &reply.lines {
        println!("{}", line);
    }
    Ok(())
}

/// Print a status message unless quiet mode is on.
pub fn print_status(ctx: &AppContext, message: &str) {
    if !ctx.quiet() {
        println!("{}", message);
    }
}
