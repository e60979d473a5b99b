//! CSV import of devotional content.
//!
//! Pasted text flows through three stages:
//!
//! - `decoder`: splits one line into trimmed fields, honoring `"` quoting
//! - `validator`: interprets the six positional columns of every line into a
//!   [`ParseResult`] with an `ok` / `warning` / `error` status
//! - `coordinator`: submits every eligible row to a [`crate::publish::Publisher`]
//!   one at a time and reports what was committed
//!
//! # Example
//!
//! ```
//! use selah::import::{parse_devotional_csv, RowStatus};
//!
//! let csv = "date,scripture_ref,scripture_text,reflection,prayer_prompt,questions\n\
//!            2026-02-12,John 3:16,\"For God so loved...\",Reflect,Pray,\"Q1?|Q2?\"";
//! let results = parse_devotional_csv(csv);
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].row, 2);
//! assert_eq!(results[0].status, RowStatus::Ok);
//! ```

pub mod coordinator;
pub mod decoder;
pub mod validator;

pub use coordinator::{import_devotionals, ImportReport, ProgressCallback, RowOutcome, TrackedRow};
pub use decoder::decode_line;
pub use validator::parse_devotional_csv;

use crate::publish::NewDevotional;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Severity of a parsed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// Every field is present.
    Ok,
    /// Only soft-required fields (prayer prompt, questions) are missing.
    Warning,
    /// The row is excluded from import.
    Error,
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowStatus::Ok => "ok",
            RowStatus::Warning => "warning",
            RowStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// A devotional interpreted from one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDevotional {
    /// Target publish date.
    pub date: NaiveDate,
    pub scripture_ref: String,
    pub scripture_text: String,
    pub reflection: String,
    pub prayer_prompt: String,
    /// Reflection questions, in column order.
    pub questions: Vec<String>,
}

impl ParsedDevotional {
    /// Builds the payload handed to a publisher.
    pub fn to_new_devotional(&self) -> NewDevotional {
        NewDevotional {
            scripture_ref: self.scripture_ref.clone(),
            scripture_text: self.scripture_text.clone(),
            reflection: self.reflection.clone(),
            prayer_prompt: self.prayer_prompt.clone(),
            questions: self.questions.clone(),
            publish_date: self.date,
        }
    }
}

/// Outcome of parsing one input row.
///
/// One of these is produced for every processed line, even when the line
/// could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// 1-based row number among the non-blank input lines (0 for "no data").
    pub row: usize,
    /// The interpreted devotional, absent when the row could not be decoded.
    pub data: Option<ParsedDevotional>,
    pub status: RowStatus,
    /// Explanation, present whenever the status is not `ok`.
    pub message: Option<String>,
}

impl ParseResult {
    /// Whether this row will be submitted by the coordinator.
    pub fn is_eligible(&self) -> bool {
        self.status != RowStatus::Error && self.data.is_some()
    }
}
