//! Review report shown before anything is imported.

use crate::errors::{AppError, AppResult};
use crate::import::{ParseResult, RowStatus};
use std::fmt::Write as _;

/// Row counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewSummary {
    pub ok: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl PreviewSummary {
    pub fn from_results(results: &[ParseResult]) -> Self {
        results
            .iter()
            .fold(PreviewSummary::default(), |mut summary, result| {
                match result.status {
                    RowStatus::Ok => summary.ok += 1,
                    RowStatus::Warning => summary.warnings += 1,
                    RowStatus::Error => summary.errors += 1,
                }
                summary
            })
    }

    /// Rows that an import would submit.
    pub fn importable(&self) -> usize {
        self.ok + self.warnings
    }
}

fn status_icon(status: RowStatus) -> &'static str {
    match status {
        RowStatus::Ok => "✓",
        RowStatus::Warning => "⚠",
        RowStatus::Error => "✗",
    }
}

/// Renders one line per row followed by a summary line.
///
/// ```
/// use selah::import::parse_devotional_csv;
/// use selah::ops::render_preview;
///
/// let results = parse_devotional_csv("2026-02-12,John 3:16,Text,Reflect,Pray,Q1?");
/// let report = render_preview(&results);
/// assert!(report.contains("Row 1"));
/// assert!(report.contains("1 ready to import"));
/// ```
pub fn render_preview(results: &[ParseResult]) -> String {
    let mut out = String::new();

    for result in results {
        let _ = write!(out, "{} Row {}", status_icon(result.status), result.row);
        if let Some(data) = &result.data {
            let _ = write!(out, " {}", data.date);
            if !data.scripture_ref.is_empty() {
                let _ = write!(out, " {}", data.scripture_ref);
            }
            let _ = write!(out, " ({} questions)", data.questions.len());
        }
        if let Some(message) = &result.message {
            let _ = write!(out, " - {}", message);
        }
        out.push('\n');
    }

    let summary = PreviewSummary::from_results(results);
    let _ = writeln!(
        out,
        "{} rows: {} ok, {} warnings, {} errors; {} ready to import",
        results.len(),
        summary.ok,
        summary.warnings,
        summary.errors,
        summary.importable()
    );
    out
}

/// Serializes the parse results as pretty JSON.
pub fn preview_json(results: &[ParseResult]) -> AppResult<String> {
    serde_json::to_string_pretty(results)
        .map_err(|e| AppError::Import(format!("Failed to serialize preview: {}", e)))
}
