//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The database is used as a plain key-value medium; the queue state
//! mapping onto keys lives in `state.rs`.

mod state;

pub use state::{CUSTOMERS_KEY, REVENUE_KEY, SERVED_KEY};

use crate::error::WashResult;
use rusqlite::{params, Connection, OptionalExtension};

pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    pub fn open(path: &str) -> WashResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> WashResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Open and migrate in one step.
    pub fn open_migrated(path: &str) -> WashResult<Self> {
        let store = if path == ":memory:" {
            Self::in_memory()?
        } else {
            Self::open(path)?
        };
        store.migrate()?;
        Ok(store)
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> WashResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_kv.sql"))?;
        Ok(())
    }

    // ── Key-value ─────────────────────────────────────────────

    pub fn get(&self, key: &str) -> WashResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn put(&self, key: &str, value: &str) -> WashResult<()> {
        put_on(&self.conn, key, value)?;
        Ok(())
    }

    /// Write several entries in one transaction: all land or none do.
    pub fn put_all(&mut self, entries: &[(&str, String)]) -> WashResult<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            put_on(&tx, key, value)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Drop every entry, the equivalent of clearing browser storage.
    pub fn clear(&self) -> WashResult<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }

    pub fn keys(&self) -> WashResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key ASC")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

fn put_on(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                        updated_at = excluded.updated_at",
        params![key, value, chrono::Utc::now().to_rfc3339()],
    )
}
