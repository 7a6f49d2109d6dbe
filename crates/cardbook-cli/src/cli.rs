use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use cardbook_core::{DiffMode, VERSION};

use crate::config::UserId;

/// Cardbook - a personal trading-card inventory kept as a name → quantity ledger
#[derive(Parser)]
#[command(name = "cardbook")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger database
    #[arg(short, long, global = true, env = "CARDBOOK_PATH")]
    pub ledger: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print replies as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ledger and write a default config
    Init(InitArgs),

    /// Add copies of one card: "name,quantity"
    Add(RecordArgs),

    /// Remove copies of one card: "name,quantity"
    Remove(RecordArgs),

    /// Find cards whose name contains a substring
    Search(SearchArgs),

    /// Merge a file of "name,quantity" lines into the ledger
    AddFile(BlockArgs),

    /// Subtract a file of "name,quantity" lines from the ledger
    RemoveFile(BlockArgs),

    /// Reconcile the ledger toward target quantities from a file
    Diff(BlockArgs),

    /// Show how many copies are still needed for each line of a file
    Compare(BlockArgs),

    /// Dump the ledger as "name,quantity" lines
    Export(ExportArgs),

    /// Import a CSV with a header row and name,quantity columns
    Import(ImportArgs),

    /// Convert a "<count> <name>" deck list into "name, count" lines
    Convert(ConvertArgs),

    /// Run slash-commands from stdin as a chat user
    Chat(ChatArgs),

    /// Check ledger integrity
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the ledger will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// User id allowed to use the chat session (repeatable)
    #[arg(long = "authorized-user", value_name = "ID")]
    pub authorized_users: Vec<UserId>,

    /// How `diff` stores reconciled quantities
    #[arg(long, value_enum, default_value_t = DiffModeArg::Delta)]
    pub diff_mode: DiffModeArg,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for single-record commands
#[derive(Args)]
pub struct RecordArgs {
    /// Record as "name,quantity"; extra words are joined with spaces
    #[arg(value_name = "RECORD", required = true, num_args = 1..)]
    pub record: Vec<String>,
}

impl RecordArgs {
    pub fn joined(&self) -> String {
        self.record.join(" ")
    }
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Substring to look for; words are joined with spaces
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,
}

/// Arguments for block commands
#[derive(Args)]
pub struct BlockArgs {
    /// File of "name,quantity" lines (reads stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<String>,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write the snapshot to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to import
    #[arg(value_name = "CSV")]
    pub file: String,
}

/// Arguments for the `convert` command
#[derive(Args)]
pub struct ConvertArgs {
    /// Deck list to convert (reads stdin when "-")
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Write the converted list to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

/// Arguments for the `chat` command
#[derive(Args)]
pub struct ChatArgs {
    /// Chat user id sending the commands
    #[arg(long, env = "CARDBOOK_USER")]
    pub user: UserId,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DiffModeArg {
    Delta,
    Target,
}

impl From<DiffModeArg> for DiffMode {
    fn from(value: DiffModeArg) -> Self {
        match value {
            DiffModeArg::Delta => DiffMode::Delta,
            DiffModeArg::Target => DiffMode::Target,
        }
    }
}
