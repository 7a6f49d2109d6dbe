//! Cardbook CLI - a personal trading-card inventory kept as a name → quantity ledger
//!
//! This is the command-line interface for Cardbook. It exposes the ledger
//! operations as subcommands and runs chat-style sessions over stdin.

mod app;
mod chat;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod input;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{cards, chat as chat_session, check, convert, export, import, init, misc};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        if let Some(cli_error) = e.downcast_ref::<CliError>() {
            cli_error.exit();
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so replies on stdout stay machine-readable.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(args) => init::handle_init(ctx, cli, args),
        Commands::Add(args) => cards::handle_add(ctx, args),
        Commands::Remove(args) => cards::handle_remove(ctx, args),
        Commands::Search(args) => cards::handle_search(ctx, args),
        Commands::AddFile(args) => cards::handle_add_file(ctx, args),
        Commands::RemoveFile(args) => cards::handle_remove_file(ctx, args),
        Commands::Diff(args) => cards::handle_diff(ctx, args),
        Commands::Compare(args) => cards::handle_compare(ctx, args),
        Commands::Export(args) => export::handle_export(ctx, args),
        Commands::Import(args) => import::handle_import(ctx, args),
        Commands::Convert(args) => convert::handle_convert(ctx, args),
        Commands::Chat(args) => chat_session::handle_chat(ctx, args),
        Commands::Check => check::handle_check(ctx),
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}
