//! Import operation: publish a reviewed parse report into the local store.

use crate::config::Config;
use crate::db::imports::{begin_batch, finish_batch};
use crate::db::Database;
use crate::errors::AppResult;
use crate::import::{import_devotionals, ImportReport, ParseResult, ProgressCallback};
use crate::ops::lock::ImportLock;
use crate::publish::DatabasePublisher;
use tracing::{info, warn};
use uuid::Uuid;

/// Imports every eligible row of `results` into `db`.
///
/// # Flow
///
/// 1. Take the import lock next to the database
/// 2. Record the batch in `import_batches`
/// 3. Publish eligible rows one at a time
/// 4. Record per-row outcomes in `import_log`
///
/// Re-running an interrupted import is safe: rows already stored with the
/// same content come back as `unchanged`.
///
/// # Errors
///
/// Returns an error if the lock is held elsewhere or the batch cannot be
/// recorded. Individual row failures are reported in the returned
/// [`ImportReport`], not as errors. So is a failure to record the finished
/// batch, in [`ImportReport::history_error`].
pub fn run_import(
    config: &Config,
    db: &Database,
    results: &[ParseResult],
    progress: Option<ProgressCallback<'_>>,
) -> AppResult<ImportReport> {
    let lock = ImportLock::acquire(&config.lock_path())?;

    let batch_id = Uuid::new_v4();
    {
        let conn = db.get_conn()?;
        begin_batch(&conn, batch_id)?;
    }

    let mut publisher = DatabasePublisher::new(db);
    let mut report = import_devotionals(batch_id, results, &mut publisher, progress);

    let conn = db.get_conn()?;
    if let Err(e) = finish_batch(&conn, &report) {
        warn!("Failed to record outcomes of import batch {}: {}", batch_id, e);
        report.history_error = Some(e.to_string());
    }
    drop(conn);

    info!(
        "Import batch {} done: {} committed, {} changed, {} skipped, {} excluded",
        batch_id,
        report.committed,
        report.changed(),
        report.skipped,
        report.excluded
    );

    drop(lock);
    Ok(report)
}
