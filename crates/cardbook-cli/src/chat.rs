//! Chat command dispatch.
//!
//! Messages look like the ones a chat bot receives: `/add island,4`,
//! `/search bolt`. Block commands (`/addfile`, `/comparefile`, ...) carry a
//! multi-line body, the way an uploaded file would. The dispatcher checks the
//! sender against the allow-list, routes to the ledger, and always answers
//! with a [`Reply`].

use cardbook_core::storage::LedgerStore;
use cardbook_core::{Ledger, Reply};

use crate::config::{AccessSection, UserId};
use crate::constants::{GREETING, MISSING_QUERY, UNAUTHORIZED_REPLY};

const HELP: &[&str] = &[
    "/search <text> - find cards containing <text>",
    "/add <card,quantity> - add copies",
    "/remove <card,quantity> - remove copies",
    "/compare <card,quantity> - how many copies you still need",
    "/addfile, /removefile, /difffile, /comparefile - send lines of card,quantity, end with a single '.'",
    "/export - dump the whole inventory",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Help,
    Search,
    Add,
    Remove,
    Compare,
    AddFile,
    RemoveFile,
    DiffFile,
    CompareFile,
    Export,
}

impl ChatCommand {
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name.to_ascii_lowercase().as_str() {
            "start" => ChatCommand::Start,
            "help" => ChatCommand::Help,
            "search" => ChatCommand::Search,
            "add" => ChatCommand::Add,
            "remove" => ChatCommand::Remove,
            "compare" => ChatCommand::Compare,
            "addfile" => ChatCommand::AddFile,
            "removefile" => ChatCommand::RemoveFile,
            "difffile" => ChatCommand::DiffFile,
            "comparefile" => ChatCommand::CompareFile,
            "export" => ChatCommand::Export,
            _ => return None,
        };
        Some(command)
    }

    /// Whether the command reads a multi-line body after its own line.
    pub fn takes_block(self) -> bool {
        matches!(
            self,
            ChatCommand::AddFile
                | ChatCommand::RemoveFile
                | ChatCommand::DiffFile
                | ChatCommand::CompareFile
        )
    }

    fn needs_text(self) -> bool {
        !matches!(
            self,
            ChatCommand::Start | ChatCommand::Help | ChatCommand::Export
        )
    }
}

/// A recognized command and its argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub command: ChatCommand,
    pub text: String,
}

/// Classification of one incoming line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    Command(ChatMessage),
    Unknown(String),
    Text,
}

/// Parse one incoming line.
///
/// `/name@bot args` is accepted the way group chats address a bot; the
/// `@bot` suffix is ignored.
pub fn parse_message(line: &str) -> Incoming {
    let line = line.trim();
    let Some(body) = line.strip_prefix('/') else {
        return Incoming::Text;
    };

    let (head, rest) = match body.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (body, ""),
    };
    let name = head.split('@').next().unwrap_or(head);

    match ChatCommand::from_name(name) {
        Some(command) => Incoming::Command(ChatMessage {
            command,
            text: rest.to_string(),
        }),
        None => Incoming::Unknown(name.to_string()),
    }
}

/// Routes chat messages to the ledger on behalf of a user.
pub struct Dispatcher<'a, S: LedgerStore> {
    ledger: &'a Ledger<S>,
    access: &'a AccessSection,
}

impl<'a, S: LedgerStore> Dispatcher<'a, S> {
    pub fn new(ledger: &'a Ledger<S>, access: &'a AccessSection) -> Self {
        Self { ledger, access }
    }

    pub fn is_authorized(&self, user: UserId) -> bool {
        self.access.is_authorized(user)
    }

    /// Answer one message from `user`.
    pub fn handle(&self, user: UserId, message: &ChatMessage) -> Reply {
        if !self.is_authorized(user) {
            tracing::warn!(user, command = ?message.command, "rejected unauthorized user");
            return Reply::line(UNAUTHORIZED_REPLY);
        }

        let text = message.text.as_str();
        if message.command.needs_text() && text.trim().is_empty() {
            return Reply::line(MISSING_QUERY);
        }

        tracing::info!(user, command = ?message.command, "handling command");
        match message.command {
            ChatCommand::Start => Reply::line(GREETING),
            ChatCommand::Help => Reply {
                lines: HELP.iter().map(|line| line.to_string()).collect(),
            },
            ChatCommand::Search => Reply::search(self.ledger.search(text.trim())),
            ChatCommand::Add => Reply::single(self.ledger.add(text)),
            ChatCommand::Remove => Reply::single(self.ledger.subtract(text)),
            ChatCommand::Compare | ChatCommand::CompareFile => {
                Reply::block(self.ledger.compare_block(text))
            }
            ChatCommand::AddFile => Reply::block(self.ledger.add_block(text)),
            ChatCommand::RemoveFile => Reply::block(self.ledger.subtract_block(text)),
            ChatCommand::DiffFile => Reply::block(self.ledger.diff_block(text)),
            ChatCommand::Export => Reply::export(self.ledger.export()),
        }
    }

    /// Answer for a `/name` the dispatcher does not know.
    pub fn unknown(&self, name: &str) -> Reply {
        Reply::line(format!("Unknown command: /{}. Use /help to list commands.", name))
    }

    /// Answer for a line that is not a command.
    pub fn not_a_command(&self) -> Reply {
        Reply::line("Send a command, for example /add island,4. Use /help to list commands.")
    }
}
