//! Application-level utilities for the Cardbook CLI.
//!
//! This module provides:
//! - Path resolution for config and ledger files
//! - The per-invocation context that loads config once and opens the ledger

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_config_path;
