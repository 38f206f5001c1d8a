//! Key-value blob transports.
//!
//! # Responsibility
//! - Define the get/set contract the event store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `set` replaces the whole value stored under a key.
//! - `get` of a never-written key is `Ok(None)`.

use crate::store::StoreResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;

/// Key-value storage of opaque text blobs.
pub trait BlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// Blob store over the `kv_entries` table of a migrated connection.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Wraps a connection returned by [`open_db`](crate::db::open_db) or
    /// [`open_db_in_memory`](crate::db::open_db_in_memory).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local blob store, mainly for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_db_in_memory;

    #[test]
    fn memory_store_overwrites_values() {
        let store = MemoryBlobStore::new();
        assert_eq!(None, store.get("k").unwrap());
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(Some("two".to_string()), store.get("k").unwrap());
    }

    #[test]
    fn sqlite_store_upserts_single_row() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteBlobStore::new(&conn);

        assert_eq!(None, store.get("calendar_events").unwrap());
        store.set("calendar_events", "[]").unwrap();
        store.set("calendar_events", "[1]").unwrap();

        assert_eq!(Some("[1]".to_string()), store.get("calendar_events").unwrap());
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(1, rows);
    }
}
