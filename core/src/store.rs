//! Persistence boundary: an opaque key-value byte store.
//!
//! RULE: Only the planner reads or writes saved state, and only through
//! KeyValueStore. SqliteStore is the shipped backend.

use crate::error::StaffingResult;
use rusqlite::{params, Connection, OptionalExtension};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> StaffingResult<Option<Vec<u8>>>;
    fn put(&mut self, key: &str, value: &[u8]) -> StaffingResult<()>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> StaffingResult<Self> {
        let conn = Connection::open(path)?;
        // WAL is ignored by :memory: databases.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> StaffingResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> StaffingResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_kv_store.sql"))?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StaffingResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StaffingResult<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, updated_at],
        )?;
        Ok(())
    }
}
