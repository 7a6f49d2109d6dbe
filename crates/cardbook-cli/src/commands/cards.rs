//! Ledger mutations and queries: single records, blocks, and search.

use cardbook_core::Reply;

use crate::app::AppContext;
use crate::cli::{BlockArgs, RecordArgs, SearchArgs};
use crate::input::read_input;
use crate::output::print_reply;

pub fn handle_add(ctx: &AppContext, args: &RecordArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    print_reply(ctx, &Reply::single(ledger.add(&args.joined())))
}

pub fn handle_remove(ctx: &AppContext, args: &RecordArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    print_reply(ctx, &Reply::single(ledger.subtract(&args.joined())))
}

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let query = args.query.join(" ");
    print_reply(ctx, &Reply::search(ledger.search(&query)))
}

pub fn handle_add_file(ctx: &AppContext, args: &BlockArgs) -> anyhow::Result<()> {
    let block = read_input(args.file.as_deref())?;
    let ledger = ctx.open_ledger()?;
    print_reply(ctx, &Reply::block(ledger.add_block(&block)))
}

pub fn handle_remove_file(ctx: &AppContext, args: &BlockArgs) -> anyhow::Result<()> {
    let block = read_input(args.file.as_deref())?;
    let ledger = ctx.open_ledger()?;
    print_reply(ctx, &Reply::block(ledger.subtract_block(&block)))
}

pub fn handle_diff(ctx: &AppContext, args: &BlockArgs) -> anyhow::Result<()> {
    let block = read_input(args.file.as_deref())?;
    let ledger = ctx.open_ledger()?;
    tracing::debug!(mode = ?ledger.diff_mode(), "reconciling block");
    print_reply(ctx, &Reply::block(ledger.diff_block(&block)))
}

pub fn handle_compare(ctx: &AppContext, args: &BlockArgs) -> anyhow::Result<()> {
    let block = read_input(args.file.as_deref())?;
    let ledger = ctx.open_ledger()?;
    print_reply(ctx, &Reply::block(ledger.compare_block(&block)))
}
