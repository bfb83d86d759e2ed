//! SQLite storage backend.
//!
//! The store is a single SQLite file with a `kv` table holding every key and
//! a `meta` table describing the file itself. Each write is its own implicit
//! transaction, so a returned `Ok` means the value is on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{RepbookError, Result};
use crate::storage::traits::KeyValueStore;
use crate::storage::types::StoreMetadata;

/// Current on-disk layout version.
pub const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Durable key-value store backed by SQLite.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
    device_id: Uuid,
}

impl SqliteStore {
    /// Open the store at `path`, creating the file and schema if missing.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let device_id = Self::init_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened sqlite store");

        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
            device_id,
        })
    }

    /// Open a throwaway store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let device_id = Self::init_schema(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
            device_id,
        })
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepbookError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Create tables and first-run metadata; returns the stored device id.
    fn init_schema(conn: &Connection) -> Result<Uuid> {
        conn.execute_batch(SCHEMA)?;

        let now = Utc::now().to_rfc3339();
        let fresh_id = Uuid::new_v4().to_string();
        for (key, value) in [
            ("format_version", FORMAT_VERSION),
            ("device_id", fresh_id.as_str()),
            ("created_at", now.as_str()),
            ("last_modified", now.as_str()),
        ] {
            conn.execute(
                "INSERT OR IGNORE INTO meta (key, value) VALUES (?1, ?2)",
                [key, value],
            )?;
        }

        let device_id_str: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'device_id'",
            [],
            |row| row.get(0),
        )?;
        Uuid::parse_str(&device_id_str)
            .map_err(|e| RepbookError::Storage(format!("Invalid device_id in metadata: {}", e)))
    }

    fn meta_timestamp(conn: &Connection, key: &str) -> Result<DateTime<Utc>> {
        let raw: String =
            conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
                row.get(0)
            })?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepbookError::Storage(format!("Invalid {} timestamp: {}", key, e)))
    }

    /// Read the store metadata.
    pub fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;
        let format_version: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?;

        Ok(StoreMetadata {
            format_version,
            device_id: self.device_id,
            created_at: Self::meta_timestamp(&conn, "created_at")?,
            last_modified: Self::meta_timestamp(&conn, "last_modified")?,
        })
    }

    /// Run SQLite's integrity check and verify the layout version.
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if result != "ok" {
            return Err(RepbookError::Storage(format!(
                "Integrity check failed: {}",
                result
            )));
        }

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match version.as_deref() {
            Some(FORMAT_VERSION) => Ok(()),
            Some(other) => Err(RepbookError::Storage(format!(
                "Unsupported store format version: {}",
                other
            ))),
            None => Err(RepbookError::Storage(
                "Store metadata is missing format_version".to_string(),
            )),
        }
    }
}

impl KeyValueStore for SqliteStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [key, value, now.as_str()],
        )?;
        conn.execute(
            "UPDATE meta SET value = ?1 WHERE key = 'last_modified'",
            [now.as_str()],
        )?;
        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        // substr comparison keeps `_` and `%` in prefixes literal.
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT key FROM kv WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let keys = stmt
            .query_map([prefix], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set_raw("k", "v1").unwrap();
        store.set_raw("k", "v2").unwrap();
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_prefix_treats_underscore_literally() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set_raw("temp_a", "1").unwrap();
        store.set_raw("tempXa", "2").unwrap();
        assert_eq!(
            store.keys_with_prefix("temp_").unwrap(),
            vec!["temp_a".to_string()]
        );
    }

    #[test]
    fn test_metadata_and_integrity() {
        let store = SqliteStore::open_in_memory().unwrap();
        let meta = store.metadata().unwrap();
        assert_eq!(meta.format_version, FORMAT_VERSION);
        assert!(!meta.device_id.is_nil());
        assert!(meta.last_modified >= meta.created_at);
        store.check_integrity().unwrap();
    }
}
