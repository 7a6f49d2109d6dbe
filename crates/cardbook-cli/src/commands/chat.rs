//! Line-oriented chat session over stdin.
//!
//! Each line is one message. A block command takes the lines after it, up to
//! a line holding only `.` (or end of input), as its body.

use std::io::{self, BufRead};

use crate::app::AppContext;
use crate::chat::{parse_message, ChatMessage, Dispatcher, Incoming};
use crate::cli::ChatArgs;
use crate::constants::BLOCK_TERMINATOR;
use crate::errors::CliError;
use crate::output::print_reply;

pub fn handle_chat(ctx: &AppContext, args: &ChatArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let access = ctx.access()?;
    let dispatcher = Dispatcher::new(&ledger, &access);
    if !dispatcher.is_authorized(args.user) {
        tracing::warn!(user = args.user, "chat session for user outside the allow-list");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut rejected = 0usize;

    while let Some(line) = lines.next() {
        let line = line.map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let reply = match parse_message(&line) {
            Incoming::Command(mut message) => {
                if message.command.takes_block() {
                    message.text = read_block(&message, &mut lines)?;
                }
                if !dispatcher.is_authorized(args.user) {
                    rejected += 1;
                }
                dispatcher.handle(args.user, &message)
            }
            Incoming::Unknown(name) => dispatcher.unknown(&name),
            Incoming::Text if line.trim().is_empty() => continue,
            Incoming::Text => dispatcher.not_a_command(),
        };
        print_reply(ctx, &reply)?;
    }

    if rejected > 0 {
        return Err(CliError::Unauthorized(format!(
            "User {} is not authorized; {} commands rejected",
            args.user, rejected
        ))
        .into());
    }
    Ok(())
}

/// Collect a block body: any text on the command line itself, then the
/// following lines up to the terminator.
fn read_block<I>(message: &ChatMessage, lines: &mut I) -> anyhow::Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut body: Vec<String> = Vec::new();
    if !message.text.is_empty() {
        body.push(message.text.clone());
    }
    for line in lines {
        let line = line.map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        if line.trim() == BLOCK_TERMINATOR {
            break;
        }
        body.push(line);
    }
    Ok(body.join("\n"))
}
