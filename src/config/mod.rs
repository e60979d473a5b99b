//! Configuration management for the selah application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `SELAH_DB`: Path to the devotional database (defaults to ~/.selah/devotionals.db)
//! - `SELAH_LOG_FORMAT`: `text` or `json` (defaults to `text`)
//! - `HOME`: Used for expanding the default database path

use crate::constants::{
    DEFAULT_DB_SUBPATH, ENV_VAR_HOME, ENV_VAR_SELAH_DB, ENV_VAR_SELAH_LOG_FORMAT,
    IMPORT_LOCK_EXTENSION, LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the selah application.
///
/// # Examples
///
/// ```
/// use selah::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/data/devotionals.db"),
///     log_format: "json".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// SQLite database that devotionals are published into.
    pub db_path: PathBuf,

    /// Log output format, `text` or `json`.
    pub log_format: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(""),
            log_format: LOG_FORMAT_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The database path is expanded with `shellexpand`, so `~` and `$VAR`
    /// references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The database path expansion fails
    /// - The resulting database path is empty
    pub fn load() -> AppResult<Self> {
        let db_path_str = env::var(ENV_VAR_SELAH_DB).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DB_SUBPATH)
        });

        let expanded_path = shellexpand::full(&db_path_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let db_path = PathBuf::from(expanded_path.into_owned());
        if db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        let log_format = env::var(ENV_VAR_SELAH_LOG_FORMAT)
            .map(|format| format.trim().to_lowercase())
            .unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string());

        Ok(Config {
            db_path,
            log_format,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Database path is empty"
    /// - "Database path must be an absolute path"
    /// - "Invalid log format ..." for anything other than `text` or `json`
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if self.log_format != LOG_FORMAT_TEXT && self.log_format != LOG_FORMAT_JSON {
            return Err(AppError::Config(format!(
                "Invalid log format '{}'. Expected '{}' or '{}'",
                self.log_format, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )));
        }

        Ok(())
    }

    /// Lock file guarding imports into this database.
    pub fn lock_path(&self) -> PathBuf {
        self.db_path.with_extension(IMPORT_LOCK_EXTENSION)
    }
}
