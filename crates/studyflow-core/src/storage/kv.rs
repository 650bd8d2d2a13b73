//! SQLite-backed key-value persistence.
//!
//! One row per logical entity, each holding a JSON document. Corrupt rows
//! read as absent so a damaged store never takes the application down with
//! it.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use super::{data_dir, JsonStore};
use crate::error::StorageError;

/// SQLite store at `~/.config/studyflow/studyflow.db`.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open the store at the default location, creating file and schema as
    /// needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("studyflow.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl JsonStore for KvStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        // A row that no longer parses reads as absent.
        Ok(serde_json::from_str(&raw).ok())
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value.to_string()],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
