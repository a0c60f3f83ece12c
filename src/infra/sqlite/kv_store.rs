use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::usecase::ports::storage::{RecordStorage, StorageError};

pub fn read_value(db_path: &Path, key: &str) -> Result<Option<String>> {
    init_db(db_path)?;
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
        row.get::<_, String>(0)
    })
    .optional()
    .with_context(|| format!("failed to read key: {key}"))
}

pub fn write_value(db_path: &Path, key: &str, value: &str) -> Result<()> {
    init_db(db_path)?;
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO kv(key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )
    .with_context(|| format!("failed to write key: {key}"))?;
    Ok(())
}

pub fn remove_value(db_path: &Path, key: &str) -> Result<()> {
    init_db(db_path)?;
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM kv WHERE key = ?1", [key])
        .with_context(|| format!("failed to remove key: {key}"))?;
    Ok(())
}

/// [`RecordStorage`] over a single SQLite file.
pub struct SqliteStorage {
    pub db_path: PathBuf,
}

impl SqliteStorage {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl RecordStorage for SqliteStorage {
    fn init(&self) -> Result<(), StorageError> {
        init_db(&self.db_path).map_err(|err| StorageError::Message(format!("{err:#}")))
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        read_value(&self.db_path, key).map_err(|err| StorageError::Message(format!("{err:#}")))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        write_value(&self.db_path, key, value)
            .map_err(|err| StorageError::Message(format!("{err:#}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        remove_value(&self.db_path, key).map_err(|err| StorageError::Message(format!("{err:#}")))
    }
}
