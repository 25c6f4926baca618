//! SQLite-backed key/value store.
//!
//! Values live in the `local_storage` table created by the v1 migration.
//! The optional quota counts key and value bytes across all rows.

use std::cell::Cell;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};

use super::{check_quota, KeyValueStore};
use crate::database::Database;
use crate::types::errors::StorageError;

/// Durable key/value store persisted in a SQLite file.
pub struct SqliteStore {
    db: Database,
    quota: Cell<Option<usize>>,
}

impl SqliteStore {
    /// Wraps an already-open database.
    pub fn new(db: Database, quota: Option<usize>) -> Self {
        Self {
            db,
            quota: Cell::new(quota),
        }
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota.get()
    }

    /// Changes the quota for later writes. Existing entries are kept even
    /// if they now exceed it.
    pub fn set_quota(&self, quota: Option<usize>) {
        self.quota.set(quota);
    }

    /// Opens (or creates) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P, quota: Option<usize>) -> Result<Self, StorageError> {
        let db = Database::open(path).map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(Self::new(db, quota))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory(quota: Option<usize>) -> Result<Self, StorageError> {
        let db =
            Database::open_in_memory().map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(Self::new(db, quota))
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Bytes used by every row except `key`.
    fn usage_excluding(&self, key: &str) -> Result<usize, StorageError> {
        let used: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0) \
                 FROM local_storage WHERE key != ?1",
                params![key],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(used.max(0) as usize)
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::DatabaseError(e.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let quota = self.quota.get();
        if quota.is_some() {
            let others = self.usage_excluding(key)?;
            check_quota(quota, others, key, value)?;
        }
        self.db
            .connection()
            .execute(
                "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Self::now()],
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
