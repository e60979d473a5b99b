//! Import history: one batch row per run and one log row per attempted CSV row.

use super::DbResult;
use crate::constants::DATE_FORMAT_ISO;
use crate::import::{ImportReport, RowOutcome};
use rusqlite::{params, Connection};
use tracing::debug;
use uuid::Uuid;

/// Summary of a past import run as recorded in `import_batches`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBatch {
    pub batch_id: String,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub eligible: i64,
    pub committed: i64,
    pub skipped: i64,
    pub excluded: i64,
}

/// Records the start of an import run.
pub fn begin_batch(conn: &Connection, batch_id: Uuid) -> DbResult<()> {
    debug!("Recording start of import batch {}", batch_id);
    conn.execute(
        "INSERT INTO import_batches (batch_id) VALUES (?1)",
        params![batch_id.to_string()],
    )?;
    Ok(())
}

/// Stores the totals and per-row outcomes of a finished import run.
///
/// Rows are written in one transaction so a batch is either fully logged or
/// not logged at all; the devotionals themselves were committed row by row.
pub fn finish_batch(conn: &Connection, report: &ImportReport) -> DbResult<()> {
    let batch_id = report.batch_id.to_string();
    debug!(
        "Recording {} row outcomes for import batch {}",
        report.outcomes.len(),
        batch_id
    );

    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO import_log (batch_id, row_number, publish_date, outcome, error_message)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )?;
        for row in &report.outcomes {
            let (outcome, error_message) = match &row.outcome {
                RowOutcome::Committed(outcome) => (outcome.to_string(), None),
                RowOutcome::Skipped(reason) => ("skipped".to_string(), Some(reason.as_str())),
            };
            stmt.execute(params![
                batch_id,
                row.row as i64,
                row.date.format(DATE_FORMAT_ISO).to_string(),
                outcome,
                error_message
            ])?;
        }
    }
    tx.execute(
        r#"
        UPDATE import_batches SET
            finished_at = CURRENT_TIMESTAMP,
            eligible = ?2,
            committed = ?3,
            skipped = ?4,
            excluded = ?5
        WHERE batch_id = ?1
        "#,
        params![
            batch_id,
            report.eligible as i64,
            report.committed as i64,
            report.skipped as i64,
            report.excluded as i64
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Returns the most recent import runs, newest first.
pub fn recent_batches(conn: &Connection, limit: usize) -> DbResult<Vec<ImportBatch>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT batch_id, started_at, finished_at, eligible, committed, skipped, excluded
        FROM import_batches
        ORDER BY started_at DESC, rowid DESC
        LIMIT ?1
        "#,
    )?;
    let batches = stmt
        .query_map(params![limit as i64], |row| {
            Ok(ImportBatch {
                batch_id: row.get(0)?,
                started_at: row.get(1)?,
                finished_at: row.get(2)?,
                eligible: row.get(3)?,
                committed: row.get(4)?,
                skipped: row.get(5)?,
                excluded: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}
