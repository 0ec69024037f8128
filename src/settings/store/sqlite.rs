//! SQLite-backed settings store.
//!
//! Every value lives in a single `settings` table as JSON text, keyed by
//! `(grp, identifier, key)`. rusqlite is blocking, so each call runs on the
//! blocking pool with the connection behind a mutex.

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::{ConfigStore, Group, StorePath};
use crate::settings::error::{StoreError, StoreResult};

/// The filename used when no database path is configured.
pub const DEFAULT_DB_PATH: &str = "application_data.db";

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database file and ensures the table exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        info!("Opened settings database at {:?}", path.as_ref());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        create_tables(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn run<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            f(&guard)
        })
        .await?
    }
}

fn create_tables(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            grp TEXT NOT NULL,
            identifier TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (grp, identifier, key)
        )",
        [],
    )?;
    Ok(())
}

#[async_trait]
impl ConfigStore for SqliteStore {
    async fn get(&self, path: &StorePath) -> StoreResult<Option<Value>> {
        let path = path.clone();
        self.run(move |conn| {
            let raw: Option<String> = conn
                .query_row(
                    "SELECT value FROM settings WHERE grp = ?1 AND identifier = ?2 AND key = ?3",
                    params![path.group.as_str(), path.identifier, path.key],
                    |row| row.get(0),
                )
                .optional()?;
            debug!("Read {} from settings database", path);
            raw.map(|raw| serde_json::from_str(&raw).map_err(StoreError::from))
                .transpose()
        })
        .await
    }

    async fn set(&self, path: &StorePath, value: Value) -> StoreResult<()> {
        let path = path.clone();
        self.run(move |conn| {
            let raw = serde_json::to_string(&value)?;
            conn.execute(
                "INSERT OR REPLACE INTO settings (grp, identifier, key, value) VALUES (?1, ?2, ?3, ?4)",
                params![path.group.as_str(), path.identifier, path.key, raw],
            )?;
            Ok(())
        })
        .await
    }

    async fn clear(&self, path: &StorePath) -> StoreResult<()> {
        let path = path.clone();
        self.run(move |conn| {
            conn.execute(
                "DELETE FROM settings WHERE grp = ?1 AND identifier = ?2 AND key = ?3",
                params![path.group.as_str(), path.identifier, path.key],
            )?;
            Ok(())
        })
        .await
    }

    async fn enumerate_children(&self, group: Group) -> StoreResult<BTreeSet<String>> {
        self.run(move |conn| {
            let mut statement =
                conn.prepare("SELECT DISTINCT identifier FROM settings WHERE grp = ?1")?;
            let rows = statement.query_map(params![group.as_str()], |row| row.get(0))?;
            let mut identifiers = BTreeSet::new();
            for identifier in rows {
                identifiers.insert(identifier?);
            }
            Ok(identifiers)
        })
        .await
    }
}
