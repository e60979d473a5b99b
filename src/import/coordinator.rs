//! Sequential batch import of parsed devotional rows.
//!
//! Rows are submitted strictly in input order, one at a time. A row that
//! fails to publish is recorded and skipped; it is never retried, and rows
//! committed before it stay committed.

use super::ParseResult;
use crate::publish::{PublishOutcome, Publisher};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// What happened to one eligible row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "result", content = "detail")]
pub enum RowOutcome {
    /// The publisher accepted the row.
    Committed(PublishOutcome),
    /// The publisher failed; the message explains why.
    Skipped(String),
}

impl std::fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowOutcome::Committed(outcome) => write!(f, "{}", outcome),
            RowOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

/// An eligible row together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedRow {
    /// Row number from the parse report.
    pub row: usize,
    pub date: NaiveDate,
    pub outcome: RowOutcome,
}

/// Result of a batch import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Identifier of this run, used to correlate logs and the import history.
    pub batch_id: Uuid,
    /// Rows that were submitted (status `ok` or `warning`).
    pub eligible: usize,
    /// Rows the publisher accepted.
    pub committed: usize,
    /// Rows the publisher rejected.
    pub skipped: usize,
    /// Rows never submitted because they failed validation.
    pub excluded: usize,
    /// One entry per eligible row, in submission order.
    pub outcomes: Vec<TrackedRow>,
    /// Set when the committed rows could not be written to the import history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_error: Option<String>,
}

impl ImportReport {
    /// Committed rows whose content actually changed the store.
    pub fn changed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|row| {
                matches!(
                    row.outcome,
                    RowOutcome::Committed(PublishOutcome::Created | PublishOutcome::Updated)
                )
            })
            .count()
    }
}

/// Progress callback for batch import.
///
/// Called after each eligible row is attempted with:
/// - Current row position among eligible rows (1-indexed)
/// - Total number of eligible rows
/// - The row and its outcome
pub type ProgressCallback<'a> = Box<dyn FnMut(usize, usize, &TrackedRow) + 'a>;

/// Submits every eligible row to `publisher`, in order, exactly once.
///
/// Rows with status `error` (or without data) are counted as excluded and
/// never submitted. Publisher failures are logged, recorded as
/// [`RowOutcome::Skipped`], and the loop moves on to the next row.
pub fn import_devotionals<P: Publisher + ?Sized>(
    batch_id: Uuid,
    results: &[ParseResult],
    publisher: &mut P,
    mut progress: Option<ProgressCallback<'_>>,
) -> ImportReport {
    let span = info_span!("import_batch", batch_id = %batch_id);
    let _guard = span.enter();

    let eligible: Vec<_> = results
        .iter()
        .filter(|result| result.is_eligible())
        .filter_map(|result| result.data.as_ref().map(|data| (result.row, data)))
        .collect();
    let total = eligible.len();
    let excluded = results.len() - total;

    info!(
        "Starting import of {} eligible rows ({} excluded)",
        total, excluded
    );

    let mut outcomes = Vec::with_capacity(total);
    let mut committed = 0;
    let mut skipped = 0;

    for (idx, (row, data)) in eligible.into_iter().enumerate() {
        let payload = data.to_new_devotional();

        let outcome = match publisher.publish(&payload) {
            Ok(outcome) => {
                committed += 1;
                debug!("Row {} ({}) {}", row, data.date, outcome);
                RowOutcome::Committed(outcome)
            }
            Err(e) => {
                skipped += 1;
                warn!("Row {} ({}) was not imported: {}", row, data.date, e);
                RowOutcome::Skipped(e.to_string())
            }
        };

        let tracked = TrackedRow {
            row,
            date: data.date,
            outcome,
        };
        if let Some(callback) = progress.as_mut() {
            callback(idx + 1, total, &tracked);
        }
        outcomes.push(tracked);
    }

    info!(
        "Import finished: {} of {} committed, {} skipped",
        committed, total, skipped
    );

    ImportReport {
        batch_id,
        eligible: total,
        committed,
        skipped,
        excluded,
        outcomes,
        history_error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PublishError;
    use crate::import::parse_devotional_csv;
    use crate::publish::NewDevotional;

    /// Records every submission and fails on chosen call numbers (1-based).
    #[derive(Default)]
    struct RecordingPublisher {
        calls: Vec<NaiveDate>,
        fail_on: Vec<usize>,
    }

    impl Publisher for RecordingPublisher {
        fn publish(&mut self, devotional: &NewDevotional) -> Result<PublishOutcome, PublishError> {
            self.calls.push(devotional.publish_date);
            if self.fail_on.contains(&self.calls.len()) {
                Err(PublishError::Rejected("network unavailable".to_string()))
            } else {
                Ok(PublishOutcome::Created)
            }
        }
    }

    fn five_rows() -> Vec<ParseResult> {
        let csv = (1..=5)
            .map(|d| format!("2026-03-0{},Ref,Text,Reflect,Pray,Q", d))
            .collect::<Vec<_>>()
            .join("\n");
        parse_devotional_csv(&csv)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_failed_row_is_skipped_not_retried() {
        let results = five_rows();
        let mut publisher = RecordingPublisher {
            fail_on: vec![3],
            ..Default::default()
        };

        let report = import_devotionals(Uuid::new_v4(), &results, &mut publisher, None);

        assert_eq!(report.committed, 4);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.eligible, 5);
        assert_eq!(publisher.calls, vec![day(1), day(2), day(3), day(4), day(5)]);
        assert_eq!(
            report.outcomes[2].outcome,
            RowOutcome::Skipped("network unavailable".to_string())
        );
    }

    #[test]
    fn test_error_rows_are_excluded() {
        let csv = "date,scripture_ref,scripture_text,reflection,prayer_prompt,questions\n\
                   2026-02-12,John 3:16,Text,Reflect,Pray,Q1?|Q2?\n\
                   2026-02-13,,,,,\n\
                   bad-date,Ref,Text,Reflect,Pray,Q1\n\
                   2026-02-15,Ref,Text,Reflect,,";
        let results = parse_devotional_csv(csv);
        let mut publisher = RecordingPublisher::default();

        let report = import_devotionals(Uuid::new_v4(), &results, &mut publisher, None);

        assert_eq!(report.eligible, 2);
        assert_eq!(report.excluded, 2);
        assert_eq!(report.committed, 2);
        assert_eq!(
            publisher.calls,
            vec![
                NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()
            ]
        );
        let rows: Vec<_> = report.outcomes.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![2, 5]);
    }

    #[test]
    fn test_progress_reports_each_attempt_in_order() {
        let results = five_rows();
        let mut publisher = RecordingPublisher {
            fail_on: vec![2],
            ..Default::default()
        };
        let mut seen = Vec::new();

        let report = import_devotionals(
            Uuid::new_v4(),
            &results,
            &mut publisher,
            Some(Box::new(|current: usize, total: usize, row: &TrackedRow| {
                let committed = matches!(row.outcome, RowOutcome::Committed(_));
                seen.push((current, total, row.row, committed));
            })),
        );

        assert_eq!(report.committed, 4);
        assert_eq!(
            seen,
            vec![
                (1, 5, 1, true),
                (2, 5, 2, false),
                (3, 5, 3, true),
                (4, 5, 4, true),
                (5, 5, 5, true),
            ]
        );
    }

    #[test]
    fn test_nothing_eligible() {
        let results = parse_devotional_csv("");
        let mut publisher = RecordingPublisher::default();

        let report = import_devotionals(Uuid::new_v4(), &results, &mut publisher, None);

        assert_eq!(report.eligible, 0);
        assert_eq!(report.committed, 0);
        assert_eq!(report.excluded, 1);
        assert!(publisher.calls.is_empty());
    }

    #[test]
    fn test_every_submission_failing_commits_nothing() {
        let results = five_rows();
        let mut publisher = RecordingPublisher {
            fail_on: (1..=5).collect(),
            ..Default::default()
        };

        let report = import_devotionals(Uuid::new_v4(), &results, &mut publisher, None);

        assert_eq!(report.committed, 0);
        assert_eq!(report.skipped, 5);
        assert_eq!(publisher.calls.len(), 5);
        assert_eq!(report.changed(), 0);
    }
}
