/*!
 * Shared SQLite handle for the document store.
 *
 * One connection guarded by a mutex; every query runs on the blocking
 * thread pool so handlers never stall the runtime.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::schema;

const DATA_DIR_NAME: &str = "doc-translate";
const DATABASE_FILE_NAME: &str = "documents.db";

/// Cloneable handle to the document database
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open the database under the user's data directory
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_database_path()?)
    }

    /// Open (or create) the database file at `path` and bring its schema up to date
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening document database at {:?}", path);
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {:?}", path))?;

        Self::from_connection(conn)
    }

    /// Fresh in-memory database, used by tests and the mock setup
    pub fn new_in_memory() -> Result<Self> {
        debug!("Opening in-memory document database");
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<data dir>/doc-translate/documents.db`
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DATA_DIR_NAME).join(DATABASE_FILE_NAME))
    }

    /// Run `f` against the connection on the blocking pool
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || f(&conn.lock()))
            .await
            .context("Database task panicked")?
    }

    /// Run `f` inside a transaction; an error from `f` rolls it back
    pub async fn transaction_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock();
            let tx = conn.transaction()?;
            let result = f(&tx)?;
            tx.commit()?;
            Ok(result)
        })
        .await
        .context("Database transaction task panicked")?
    }
}
