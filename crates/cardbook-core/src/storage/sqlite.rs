//! SQLite storage backend.
//!
//! The ledger is a single `cards` table keyed by canonical name. Files created
//! by older tooling (a bare `cards(name, quantity)` table) open fine: the
//! schema is created with `IF NOT EXISTS` and missing metadata is filled in.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::traits::LedgerStore;
use super::types::{canonical_key, LedgerEntry, LedgerMetadata};
use crate::error::{LedgerError, Result};

const FORMAT_VERSION: &str = "0.1";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS cards (
        name TEXT PRIMARY KEY,
        quantity INTEGER NOT NULL CHECK (quantity > 0)
    );
"#;

/// SQLite-backed card ledger.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new ledger file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the file already exists or cannot be
    /// written.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(LedgerError::Storage(format!(
                "Ledger file already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self::from_connection(conn, Some(path.to_path_buf()))?;
        tracing::debug!(path = %path.display(), "created ledger");
        Ok(store)
    }

    /// Open an existing ledger file.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the file does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LedgerError::NotFound(format!(
                "No ledger at {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        let store = Self::from_connection(conn, Some(path.to_path_buf()))?;
        tracing::debug!(path = %path.display(), "opened ledger");
        Ok(store)
    }

    /// Open a throwaway ledger that lives only in memory.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?1)",
            [FORMAT_VERSION],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('created_at', ?1)",
            [Utc::now().to_rfc3339()],
        )?;

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LedgerError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Ledger metadata.
    pub fn metadata(&self) -> Result<LedgerMetadata> {
        let conn = self.lock_conn()?;

        let meta_value = |key: &str| -> Result<String> {
            conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?
            .ok_or_else(|| LedgerError::Storage(format!("Missing metadata key: {}", key)))
        };

        let format_version = meta_value("format_version")?;
        let created_at_str = meta_value("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| LedgerError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);
        let entry_count: i64 = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;

        Ok(LedgerMetadata {
            format_version,
            created_at,
            entry_count: entry_count as usize,
        })
    }

    /// Check ledger integrity.
    ///
    /// Verifies SQLite's own page consistency and that no row violates the
    /// positive-quantity or canonical-key rules (older files lack the CHECK
    /// constraint).
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(LedgerError::Storage(format!(
                "SQLite integrity check failed: {}",
                status
            )));
        }

        let non_positive: i64 = conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE quantity <= 0",
            [],
            |row| row.get(0),
        )?;
        if non_positive > 0 {
            return Err(LedgerError::Storage(format!(
                "{} entries have a non-positive quantity",
                non_positive
            )));
        }

        let mut stmt = conn.prepare("SELECT name FROM cards")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for name in names {
            let name = name?;
            if canonical_key(&name) != name {
                return Err(LedgerError::Storage(format!(
                    "Entry {:?} is not stored under its canonical key",
                    name
                )));
            }
        }

        Ok(())
    }

    fn collect_entries(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<LedgerEntry>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok(LedgerEntry {
                name: row.get(0)?,
                quantity: row.get(1)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

impl LedgerStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<i64>> {
        let conn = self.lock_conn()?;
        let quantity = conn
            .query_row(
                "SELECT quantity FROM cards WHERE name = ?1",
                [canonical_key(key)],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(quantity)
    }

    fn upsert(&self, key: &str, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(format!(
                "refusing to store quantity {} for {:?}",
                quantity, key
            )));
        }

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO cards (name, quantity) VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET quantity = excluded.quantity
            "#,
            params![canonical_key(key), quantity],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let removed = conn.execute("DELETE FROM cards WHERE name = ?1", [canonical_key(key)])?;
        Ok(removed > 0)
    }

    fn scan_contains(&self, substring: &str) -> Result<Vec<LedgerEntry>> {
        let conn = self.lock_conn()?;
        // instr() is a plain case-sensitive match; LIKE would fold ASCII case
        // and treat % and _ in the query as wildcards.
        Self::collect_entries(
            &conn,
            "SELECT name, quantity FROM cards WHERE instr(name, ?1) > 0 ORDER BY rowid",
            [substring],
        )
    }

    fn scan_all(&self) -> Result<Vec<LedgerEntry>> {
        let conn = self.lock_conn()?;
        Self::collect_entries(
            &conn,
            "SELECT name, quantity FROM cards ORDER BY rowid",
            params![],
        )
    }
}
