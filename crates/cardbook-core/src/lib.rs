//! # Cardbook Core
//!
//! Core library for Cardbook - a personal trading-card inventory kept as a
//! single name → quantity ledger.
//!
//! This crate provides the reconciliation engine, the record parser, and the
//! storage abstractions, independent of any command surface.
//!
//! ## Architecture
//!
//! - **record**: `name,quantity` line parsing and block splitting
//! - **storage**: `LedgerStore` trait plus SQLite and in-memory backends
//! - **engine**: the `Ledger` operations (merge, floor-delete, reconcile, compare)
//! - **reply**: turning outcomes and errors into user-facing lines
//! - **convert**: deck-list export conversion
//! - **import**: one-time CSV import

pub mod convert;
pub mod engine;
pub mod error;
pub mod fs;
pub mod import;
pub mod record;
pub mod reply;
pub mod storage;

pub use engine::{DiffMode, Ledger};
pub use error::{LedgerError, Result};
pub use reply::Reply;
pub use storage::LedgerStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
