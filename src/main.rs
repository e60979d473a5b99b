/*!
# Selah - Devotional CSV Import

Command-line entry point. Parses arguments, loads configuration, sets up
structured logging and dispatches to the operations in `selah::ops`.

## Usage

```text
selah [OPTIONS] <COMMAND>

Commands:
  preview  Parse a CSV file and show what would be imported
  import   Parse a CSV file and publish every ok or warning row
  list     List published devotionals
  show     Show the devotional published on a date
  history  Show recent import runs

Options:
      --log-format <LOG_FORMAT>  Log output format [possible values: text, json]
  -v, --verbose                  Print verbose output
```

## Configuration

- `SELAH_DB`: database path (defaults to `~/.selah/devotionals.db`)
- `SELAH_LOG_FORMAT`: `text` or `json`
- `RUST_LOG`: log filter (defaults to `info`, or `debug` with `--verbose`)
*/

use clap::Parser;
use selah::cli::{parse_date, CliArgs, Command};
use selah::config::Config;
use selah::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, STDIN_PATH, TRACING_ROOT_SPAN_NAME,
    TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use selah::db::Database;
use selah::errors::{AppError, AppResult};
use selah::import::{parse_devotional_csv, ProgressCallback, TrackedRow};
use selah::ops::{self, PreviewSummary};
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::Path;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let args = CliArgs::parse();

    // Configuration errors are reported before logging exists
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_format, args.verbose);

    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    if let Err(e) = run(args, &config) {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(args: &CliArgs) -> AppResult<Config> {
    let mut config = Config::load()?;
    if let Some(format) = &args.log_format {
        config.log_format = format.clone();
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(log_format: &str, verbose: bool) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format == LOG_FORMAT_JSON {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(io::stderr().is_terminal())
                    .with_writer(io::stderr),
            )
            .init();
    }
}

fn run(args: CliArgs, config: &Config) -> AppResult<()> {
    info!("Starting selah");
    debug!("CLI arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match args.command {
        Command::Preview { file, json } => {
            let results = parse_devotional_csv(&read_input(&file)?);
            if json {
                println!("{}", ops::preview_json(&results)?);
            } else {
                print!("{}", ops::render_preview(&results));
            }
        }
        Command::Import { file, yes } => {
            if is_stdin(&file) && !yes {
                return Err(AppError::Import(
                    "Reading from stdin requires --yes, since the confirmation prompt also reads stdin"
                        .to_string(),
                ));
            }

            let results = parse_devotional_csv(&read_input(&file)?);
            print!("{}", ops::render_preview(&results));

            let importable = PreviewSummary::from_results(&results).importable();
            if importable == 0 {
                println!("Nothing to import.");
                return Ok(());
            }
            if !yes && !confirm(&format!("Import {} devotionals?", importable))? {
                println!("Import cancelled.");
                return Ok(());
            }

            let progress: ProgressCallback<'_> =
                Box::new(|current: usize, total: usize, row: &TrackedRow| {
                    println!(
                        "[{}/{}] Row {} ({}): {}",
                        current, total, row.row, row.date, row.outcome
                    );
                });
            let db = open_store(config)?;
            let report = ops::run_import(config, &db, &results, Some(progress))?;
            println!(
                "Imported {} of {} devotionals",
                report.committed, report.eligible
            );
            if let Some(e) = &report.history_error {
                println!("Warning: this import was not recorded in history: {}", e);
            }
        }
        Command::List { from, to } => {
            let from = from.as_deref().map(parse_cli_date).transpose()?;
            let to = to.as_deref().map(parse_cli_date).transpose()?;
            print!("{}", ops::list(&open_store(config)?, from, to)?);
        }
        Command::Show { date } => {
            let date = parse_cli_date(&date)?;
            print!("{}", ops::show(&open_store(config)?, date)?);
        }
        Command::History { limit } => {
            print!("{}", ops::history(&open_store(config)?, limit)?);
        }
    }

    info!("Done");
    Ok(())
}

/// Opens the database, creating it and its schema on first use.
fn open_store(config: &Config) -> AppResult<Database> {
    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    Ok(db)
}

fn parse_cli_date(date: &str) -> AppResult<chrono::NaiveDate> {
    parse_date(date)
        .map_err(|e| AppError::Import(format!("Invalid date '{}': {}", date, e)))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

fn read_input(path: &Path) -> AppResult<String> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| {
        AppError::Import(format!("Failed to read {}: {}", path.display(), e))
    })
}

/// Asks a yes/no question on stdout; anything but y/yes counts as no.
fn confirm(question: &str) -> AppResult<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    Ok(matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
