use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Preview and import daily devotionals from CSV
#[derive(Parser, Debug)]
#[command(name = APP_NAME, author, version, about = APP_DESCRIPTION, long_about = None)]
pub struct CliArgs {
    /// Log output format (overrides SELAH_LOG_FORMAT)
    #[arg(long, global = true, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: Option<String>,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Parse a CSV file and show what would be imported
    Preview {
        /// CSV file to read, or `-` for stdin
        file: PathBuf,

        /// Print the parse report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a CSV file and publish every ok or warning row
    Import {
        /// CSV file to read, or `-` for stdin (requires --yes)
        file: PathBuf,

        /// Import without asking for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List published devotionals
    List {
        /// First date to include (YYYY-MM-DD or YYYYMMDD)
        #[arg(long)]
        from: Option<String>,

        /// Last date to include (YYYY-MM-DD or YYYYMMDD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show the devotional published on a date
    Show {
        /// Date to show (YYYY-MM-DD or YYYYMMDD)
        date: String,
    },

    /// Show recent import runs
    History {
        /// Number of runs to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}

/// Parses a date given on the command line, in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::from_str(date_str)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}
