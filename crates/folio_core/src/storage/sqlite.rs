//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist key-value items in the `kv_items` table.
//! - Enforce the optional byte quota before every write.
//!
//! # Invariants
//! - Quota accounting sums `key` and `value` byte lengths over all rows.
//! - Writes are single-statement upserts; a rejected write leaves the row
//!   untouched.

use super::{check_quota, entry_bytes, KvStore, StorageError, StorageResult};
use crate::db::{open_db, open_db_in_memory};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Durable `KvStore` living in one SQLite database file.
pub struct SqliteKvStore {
    conn: Connection,
    quota_bytes: Option<u64>,
}

impl SqliteKvStore {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>, quota_bytes: Option<u64>) -> StorageResult<Self> {
        let conn = open_db(path)?;
        Ok(Self { conn, quota_bytes })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(quota_bytes: Option<u64>) -> StorageResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self { conn, quota_bytes })
    }

    /// Total bytes currently stored.
    pub fn usage_bytes(&self) -> StorageResult<u64> {
        self.usage_excluding(None)
    }

    fn usage_excluding(&self, key: Option<&str>) -> StorageResult<u64> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM kv_items
             WHERE ?1 IS NULL OR key <> ?1;",
            params![key],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

impl KvStore for SqliteKvStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.quota_bytes.is_some() {
            let required = self.usage_excluding(Some(key))? + entry_bytes(key, value);
            if let Err(err) = check_quota(required, self.quota_bytes) {
                if let StorageError::QuotaExceeded {
                    required_bytes,
                    quota_bytes,
                } = &err
                {
                    warn!(
                        "event=kv_set module=storage status=error error_code=quota_exceeded key={key} required_bytes={required_bytes} quota_bytes={quota_bytes}"
                    );
                }
                return Err(err);
            }
        }

        self.conn.execute(
            "INSERT INTO kv_items (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_items WHERE key = ?1;", [key])?;
        Ok(())
    }
}
