//! Database operations for published devotionals.
//!
//! This module provides SQLite storage for devotionals and the import log. It
//! uses connection pooling via r2d2 so the CLI and tests can share one handle.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `devotionals`: Devotional upsert and queries
//! - `imports`: Per-row import log
//!
//! # Example
//!
//! ```no_run
//! use selah::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/devotionals.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod devotionals;
pub mod imports;
pub mod schema;

use crate::constants::DB_POOL_MAX_SIZE;
use crate::errors::DatabaseError;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DatabaseError>;

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite database at `db_path`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> DbResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Custom(format!(
                        "Failed to create database directory {:?}: {}",
                        parent, e
                    ))
                })?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(DB_POOL_MAX_SIZE)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)?;

        // Fail early on an unreadable file rather than on first use
        let conn = pool.get()?;
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> DbResult<PooledConnection> {
        Ok(self.pool.get()?)
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    pub fn initialize_schema(&self) -> DbResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

/// Per-connection settings applied whenever a connection is handed out.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_and_connect() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn test_open_creates_missing_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested/deeper/test.db");

        Database::open(&db_path).unwrap();

        assert!(db_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();

        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();
    }
}
