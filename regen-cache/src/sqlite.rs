//! SQLite-backed cache store.
//!
//! Entries carry an absolute expiry in unix milliseconds. Expired rows are
//! invisible to reads and swept on the next write.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::store::CacheStore;

/// Schema for the cache table.
pub fn create_schema() -> &'static str {
    "
    CREATE TABLE IF NOT EXISTS cache_entries (
        key        TEXT PRIMARY KEY,
        payload    TEXT NOT NULL,
        expires_at INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_cache_entries_expires
        ON cache_entries(expires_at);
    "
}

/// Durable store backed by a SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a cache database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SqliteStore> {
        SqliteStore::from_connection(Connection::open(path)?)
    }

    /// Fresh in-memory database, mainly for tests and one-shot runs.
    pub fn open_in_memory() -> Result<SqliteStore> {
        SqliteStore::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<SqliteStore> {
        conn.execute_batch(create_schema())?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CacheStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now_ms = Utc::now().timestamp_millis();
        let conn = self.lock();
        let payload = conn
            .query_row(
                "SELECT payload FROM cache_entries WHERE key = ?1 AND expires_at > ?2",
                params![key, now_ms],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()> {
        let now_ms = Utc::now().timestamp_millis();
        let expires_at = now_ms + ttl.as_millis() as i64;
        let conn = self.lock();
        conn.execute(
            "DELETE FROM cache_entries WHERE expires_at <= ?1",
            params![now_ms],
        )?;
        conn.execute(
            "INSERT OR REPLACE INTO cache_entries (key, payload, expires_at)
             VALUES (?1, ?2, ?3)",
            params![key, payload, expires_at],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_and_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'cache_entries'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn set_then_get_returns_the_payload() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "payload", Duration::from_secs(60)).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("payload".to_string()));
    }

    #[test]
    fn missing_key_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn zero_ttl_is_invisible_to_reads() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "payload", Duration::ZERO).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn set_replaces_an_existing_entry() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "old", Duration::from_secs(60)).unwrap();
        store.set("k", "new", Duration::from_secs(60)).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn writes_sweep_expired_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("dead", "payload", Duration::ZERO).unwrap();
        store.set("live", "payload", Duration::from_secs(60)).unwrap();

        let conn = store.lock();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
