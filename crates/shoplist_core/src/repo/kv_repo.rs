//! Key-value persistence contracts and implementations.
//!
//! # Responsibility
//! - Store JSON-encoded list state blobs under well-known keys.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Values are opaque strings; callers own the encoding.
//! - `set_many` is all-or-nothing on backends that support transactions.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the `sections` mapping.
pub const SECTIONS_KEY: &str = "sections";
/// Key holding the `selectedItems` mapping.
pub const SELECTED_ITEMS_KEY: &str = "selectedItems";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by key-value backends.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite transport or bootstrap failure.
    Db(DbError),
    /// Backend refused the operation for a non-SQL reason.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence adapter for list state.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes one value, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Writes several values as one unit.
    ///
    /// The default implementation writes sequentially; transactional
    /// backends override it.
    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        (**self).set_many(entries)
    }
}

/// SQLite-backed store over the `kv_store` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

const UPSERT_SQL: &str = "INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at;";

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(UPSERT_SQL, params![key, value])?;
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(UPSERT_SQL, params![key, value])?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Process-local store, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every key, like clearing browser storage.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl KeyValueStore for MemoryKeyValueStore {
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
    use super::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_store_returns_none_for_missing_key() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        assert_eq!(store.get("sections").unwrap(), None);
    }

    #[test]
    fn sqlite_store_overwrites_existing_value() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        store.set("sections", "{}").unwrap();
        store.set("sections", r#"{"A":[]}"#).unwrap();
        assert_eq!(store.get("sections").unwrap().as_deref(), Some(r#"{"A":[]}"#));
    }

    #[test]
    fn sqlite_set_many_writes_all_entries() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        store
            .set_many(&[("sections", "{}"), ("selectedItems", "{}")])
            .unwrap();
        assert!(store.get("sections").unwrap().is_some());
        assert!(store.get("selectedItems").unwrap().is_some());
    }

    #[test]
    fn memory_store_clear_forgets_everything() {
        let store = MemoryKeyValueStore::new();
        store.set("selectedItems", "{}").unwrap();
        store.clear();
        assert_eq!(store.get("selectedItems").unwrap(), None);
    }
}
