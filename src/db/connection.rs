use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use crate::errors::ServerError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Thread-local connection slots, one per database path.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut slots = cell.borrow_mut();
                if !slots.contains_key(&self.path) {
                    let conn = open_connection(&self.path)?;
                    slots.insert(self.path.clone(), conn);
                }
                let conn = slots
                    .get_mut(&self.path)
                    .ok_or(ServerError::InternalError)?;
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open_connection(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| ServerError::DbError(format!("Set busy timeout failed: {e}")))?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
    tracing::debug!(path, "opened sqlite connection");
    Ok(conn)
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::info!(schema_path, db = db.path(), "database initialized");
    Ok(())
}
