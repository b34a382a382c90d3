//! SQLite-backed draft slots (`drafts` table, one row per key).

use crate::errors::AppResult;
use crate::storage::DraftStore;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

pub struct SqliteDraftStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteDraftStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// When the slot under `key` was last written, if it exists.
    pub fn updated_at(&self, key: &str) -> AppResult<Option<String>> {
        let ts = self
            .conn
            .query_row(
                "SELECT updated_at FROM drafts WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ts)
    }
}

impl DraftStore for SqliteDraftStore<'_> {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let payload = self
            .conn
            .query_row("SELECT payload FROM drafts WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(payload)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO drafts (key, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload,
                                            updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key, value, Local::now().to_rfc3339()])?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM drafts WHERE key = ?1", [key])?;
        Ok(())
    }
}
