/*!
# Selah

Selah bulk-imports daily devotionals (scripture, reflection, prayer prompt and
reflection questions) from pasted CSV text. Every row is validated and shown
for review before anything is published, and a bad row never blocks the rest
of the batch.

## Core Features

- Decode quoted CSV lines (`"a,""b"",c"` yields `a,"b",c`)
- Validate each row into `ok`, `warning` or `error` with a readable message
- Publish eligible rows one at a time, skipping rows the store rejects
- Re-run imports safely: identical content is reported as unchanged

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `import`: Line decoder, row validator and batch import coordinator
- `publish`: The `Publisher` seam and its SQLite implementation
- `db`: SQLite storage for devotionals and import history
- `ops`: User-facing operations behind each subcommand

## Usage Example

```rust,no_run
use selah::db::Database;
use selah::import::parse_devotional_csv;
use selah::{ops, Config};

fn main() -> selah::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    let results = parse_devotional_csv(&std::fs::read_to_string("february.csv")?);
    print!("{}", ops::render_preview(&results));

    let report = ops::run_import(&config, &db, &results, None)?;
    println!("Imported {} of {} devotionals", report.committed, report.eligible);
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Storage for devotionals and import history
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// CSV decoding, validation and batch import
pub mod import;
/// User-facing operations
pub mod ops;
/// Publishing seam between the importer and the store
pub mod publish;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use import::{ImportReport, ParseResult, ParsedDevotional, RowStatus};
pub use publish::{NewDevotional, PublishOutcome, Publisher};
