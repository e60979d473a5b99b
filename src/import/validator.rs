//! Row validation and normalization for devotional CSV input.
//!
//! Every processed line yields exactly one [`ParseResult`]; a bad row never
//! aborts the rest of the batch.

use super::decoder::decode_line;
use super::{ParseResult, ParsedDevotional, RowStatus};
use crate::constants::{
    BYTE_ORDER_MARK, DATE_NOON_ANCHOR, DATE_TIME_FORMAT_ANCHORED, MIN_COLUMNS,
    MISSING_REQUIRED_PREFIX, NO_DATA_MESSAGE, QUESTION_SEPARATOR,
};
use crate::errors::RowError;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

/// A field whose absence is reported on the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingField {
    ScriptureRef,
    ScriptureText,
    Reflection,
    PrayerPrompt,
    Questions,
}

impl MissingField {
    fn label(self) -> &'static str {
        match self {
            MissingField::ScriptureRef => "scripture reference",
            MissingField::ScriptureText => "scripture text",
            MissingField::Reflection => "reflection",
            MissingField::PrayerPrompt => "prayer prompt",
            MissingField::Questions => "questions",
        }
    }

    /// Hard-required fields turn a row into an error.
    fn is_hard_required(self) -> bool {
        matches!(
            self,
            MissingField::ScriptureRef | MissingField::ScriptureText | MissingField::Reflection
        )
    }
}

/// Parses a pasted CSV blob into one result per data row.
///
/// Lines are split on `\n` (an optional preceding `\r` is dropped), trimmed,
/// and blank lines are ignored. If the first remaining line starts with
/// `date` or mentions `scripture_ref` (case-insensitively) it is treated as a
/// header and skipped. Row numbers count the remaining lines from 1, header
/// included, so the first data row after a header is row 2.
///
/// A leading byte-order mark (as written by spreadsheet "CSV UTF-8" exports)
/// is ignored. Input with no non-blank lines yields a single row-0 error.
pub fn parse_devotional_csv(text: &str) -> Vec<ParseResult> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return vec![ParseResult {
            row: 0,
            data: None,
            status: RowStatus::Error,
            message: Some(NO_DATA_MESSAGE.to_string()),
        }];
    }

    let start = if is_header(lines[0]) { 1 } else { 0 };
    debug!(
        "Parsing {} lines (header detected: {})",
        lines.len(),
        start == 1
    );

    lines
        .iter()
        .enumerate()
        .skip(start)
        .map(|(idx, line)| parse_row(idx + 1, line))
        .collect()
}

fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.starts_with("date") || lower.contains("scripture_ref")
}

fn parse_row(row: usize, line: &str) -> ParseResult {
    match interpret_row(line) {
        Ok((devotional, missing)) => classify(row, devotional, &missing),
        Err(e) => ParseResult {
            row,
            data: None,
            status: RowStatus::Error,
            message: Some(e.to_string()),
        },
    }
}

fn interpret_row(line: &str) -> Result<(ParsedDevotional, Vec<MissingField>), RowError> {
    let mut fields = decode_line(line);
    if fields.len() < MIN_COLUMNS {
        return Err(RowError::TooFewColumns {
            found: fields.len(),
        });
    }
    fields.truncate(6);
    fields.resize(6, String::new());

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    let date_raw = next();
    let scripture_ref = next();
    let scripture_text = next();
    let reflection = next();
    let prayer_prompt = next();
    let questions_raw = next();

    let date = parse_row_date(&date_raw)?;
    let questions = split_questions(&questions_raw);

    let mut missing = Vec::new();
    if scripture_ref.is_empty() {
        missing.push(MissingField::ScriptureRef);
    }
    if scripture_text.is_empty() {
        missing.push(MissingField::ScriptureText);
    }
    if reflection.is_empty() {
        missing.push(MissingField::Reflection);
    }
    if prayer_prompt.is_empty() {
        missing.push(MissingField::PrayerPrompt);
    }
    if questions.is_empty() {
        missing.push(MissingField::Questions);
    }

    let devotional = ParsedDevotional {
        date,
        scripture_ref,
        scripture_text,
        reflection,
        prayer_prompt,
        questions,
    };

    Ok((devotional, missing))
}

/// Validates `YYYY-MM-DD` and builds the date anchored at noon.
///
/// Construction is strict: `2026-02-30` is rejected rather than rolled over.
fn parse_row_date(raw: &str) -> Result<NaiveDate, RowError> {
    let invalid = || RowError::InvalidDate {
        date: raw.to_string(),
    };

    if !DATE_PATTERN.is_match(raw) {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(
        &format!("{}{}", raw, DATE_NOON_ANCHOR),
        DATE_TIME_FORMAT_ANCHORED,
    )
    .map(|anchored| anchored.date())
    .map_err(|_| invalid())
}

fn split_questions(raw: &str) -> Vec<String> {
    raw.split(QUESTION_SEPARATOR)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

fn classify(row: usize, devotional: ParsedDevotional, missing: &[MissingField]) -> ParseResult {
    if missing.is_empty() {
        return ParseResult {
            row,
            data: Some(devotional),
            status: RowStatus::Ok,
            message: None,
        };
    }

    let labels = missing
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ");

    let (status, message) = if missing.iter().any(|field| field.is_hard_required()) {
        (
            RowStatus::Error,
            format!("{}{}", MISSING_REQUIRED_PREFIX, labels),
        )
    } else {
        (RowStatus::Warning, labels)
    };

    ParseResult {
        row,
        data: Some(devotional),
        status,
        message: Some(message),
    }
}
