//! Database schema definitions and initialization.
//!
//! This module defines the SQLite schema for published devotionals and the
//! import history. All tables are created with proper indexes and foreign key
//! constraints.

use super::DbResult;
use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates all database tables and indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Tables
///
/// - `devotionals`: One published devotional per date
/// - `import_batches`: One row per import run with its totals
/// - `import_log`: Outcome of every row attempted by an import run
/// - `schema_version`: Applied schema versions
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> DbResult<()> {
    debug!("Creating database tables");

    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Questions are stored as a JSON array of strings
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS devotionals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            publish_date DATE NOT NULL UNIQUE,
            scripture_ref TEXT NOT NULL,
            scripture_text TEXT NOT NULL,
            reflection TEXT NOT NULL,
            prayer_prompt TEXT NOT NULL DEFAULT '',
            questions TEXT NOT NULL DEFAULT '[]',
            checksum TEXT NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_devotionals_publish_date ON devotionals(publish_date DESC);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS import_batches (
            batch_id TEXT PRIMARY KEY,
            started_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            finished_at DATETIME,
            eligible INTEGER NOT NULL DEFAULT 0,
            committed INTEGER NOT NULL DEFAULT 0,
            skipped INTEGER NOT NULL DEFAULT 0,
            excluded INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS import_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            batch_id TEXT NOT NULL,
            row_number INTEGER NOT NULL,
            publish_date DATE NOT NULL,
            outcome TEXT NOT NULL CHECK(outcome IN ('created', 'updated', 'unchanged', 'skipped')),
            error_message TEXT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (batch_id) REFERENCES import_batches(batch_id) ON DELETE CASCADE,
            UNIQUE(batch_id, row_number)
        );

        CREATE INDEX IF NOT EXISTS idx_import_log_batch_id ON import_log(batch_id);
        CREATE INDEX IF NOT EXISTS idx_import_log_publish_date ON import_log(publish_date);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )?;

    // Record schema version if not already recorded
    let current_version = get_schema_version(conn)?;
    if current_version.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?)",
            [SCHEMA_VERSION],
        )?;
        info!("Initialized database schema version {}", SCHEMA_VERSION);
    } else {
        debug!("Schema version already recorded: {:?}", current_version);
    }

    debug!("Database tables created successfully");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `None` if the schema_version table doesn't exist or is empty.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than missing table.
pub fn get_schema_version(conn: &Connection) -> DbResult<Option<i32>> {
    let result = conn.query_row(
        "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
        [],
        |row| row.get(0),
    );

    match result {
        Ok(version) => Ok(Some(version)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) if e.to_string().contains("no such table") => Ok(None),
        Err(e) => Err(e.into()),
    }
}
