//! Constants used throughout the application.
//!
//! This module contains all constants used in the Selah application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "selah";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Preview and import daily devotionals from CSV";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";
/// Input path that means "read from stdin".
pub const STDIN_PATH: &str = "-";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the devotional database path.
pub const ENV_VAR_SELAH_DB: &str = "SELAH_DB";
/// Environment variable for specifying the log format.
pub const ENV_VAR_SELAH_LOG_FORMAT: &str = "SELAH_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default database location relative to the user's home directory.
pub const DEFAULT_DB_SUBPATH: &str = ".selah/devotionals.db";

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// CSV Import
/// Minimum number of columns a data row must have (questions are optional).
pub const MIN_COLUMNS: usize = 5;
/// Separator between individual questions in the questions column.
pub const QUESTION_SEPARATOR: char = '|';
/// Time of day appended to row dates before constructing a calendar date.
pub const DATE_NOON_ANCHOR: &str = "T12:00:00";
/// Message reported when the input contains no non-blank lines.
pub const NO_DATA_MESSAGE: &str = "No data found";
/// Byte-order mark some spreadsheet exports put at the start of the file.
pub const BYTE_ORDER_MARK: char = '\u{feff}';
/// Prefix for messages on rows missing a hard-required field.
pub const MISSING_REQUIRED_PREFIX: &str = "Missing required fields: ";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Date-time format used when parsing a noon-anchored row date.
pub const DATE_TIME_FORMAT_ANCHORED: &str = "%Y-%m-%dT%H:%M:%S";
/// Date format used when displaying a devotional.
pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y: %A";

// Storage
/// Extension of the lock file placed next to the database during imports.
pub const IMPORT_LOCK_EXTENSION: &str = "lock";
/// Maximum number of pooled database connections.
pub const DB_POOL_MAX_SIZE: u32 = 5;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "selah";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
