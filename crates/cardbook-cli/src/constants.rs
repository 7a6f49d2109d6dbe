//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, ledger, input file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// The user id is not on the allow-list.
    pub const UNAUTHORIZED: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Line that ends a block in a chat session.
pub const BLOCK_TERMINATOR: &str = ".";

/// Greeting for `/start`.
pub const GREETING: &str = "Hello! Use /search <query> to search.";

/// Reply when a command is sent without arguments.
pub const MISSING_QUERY: &str = "Please provide a query.";

/// Reply for users outside the allow-list.
pub const UNAUTHORIZED_REPLY: &str = "You are not authorized to use this bot.";
