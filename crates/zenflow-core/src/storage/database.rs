//! Local key-value storage.
//!
//! The dashboard persists five independent keys. On disk they live in a
//! single SQLite `kv` table; tests and throwaway runs use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;

/// String key-value store. Every call is an independent write or read;
/// nothing spans keys.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// SQLite-backed store at `<data_dir>/zenflow.db`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store in the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open_default() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::DataDir(e.to_string()))?;
        Self::open(&dir.join("zenflow.db"))
    }

    /// Open (or create) the store at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory store. Clones share the same map, which is how tests open a
/// "fresh" bridge over data an earlier one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_kv_store() {
        let store = SqliteStore::open_memory().unwrap();
        assert!(store.get("test").unwrap().is_none());
        store.set("test", "hello").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "hello");
        store.set("test", "again").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "again");
        store.remove("test").unwrap();
        assert!(store.get("test").unwrap().is_none());
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zenflow.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("zenflow-theme", "zen").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("zenflow-theme").unwrap().as_deref(), Some("zen"));
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("a", "1").unwrap();
        assert_eq!(other.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(other.len(), 1);
    }
}
