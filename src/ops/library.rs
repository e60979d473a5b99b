//! Read-only views over the stored devotionals and import history.

use crate::constants::DISPLAY_DATE_FORMAT;
use crate::db::devotionals::{get_devotional_by_date, list_devotionals, Devotional};
use crate::db::imports::{recent_batches, ImportBatch};
use crate::db::Database;
use crate::errors::{AppResult, DatabaseError};
use chrono::NaiveDate;
use std::fmt::Write as _;

/// Renders one line per devotional: date, reference and question count.
pub fn list(db: &Database, from: Option<NaiveDate>, to: Option<NaiveDate>) -> AppResult<String> {
    let conn = db.get_conn()?;
    let devotionals = list_devotionals(&conn, from, to)?;

    if devotionals.is_empty() {
        return Ok("No devotionals found.\n".to_string());
    }

    let mut out = String::new();
    for devotional in &devotionals {
        let _ = writeln!(
            out,
            "{}  {}  ({} questions)",
            devotional.publish_date,
            devotional.scripture_ref,
            devotional.questions.len()
        );
    }
    Ok(out)
}

/// Renders the full devotional for `date`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if nothing is published on that date.
pub fn show(db: &Database, date: NaiveDate) -> AppResult<String> {
    let conn = db.get_conn()?;
    let devotional = get_devotional_by_date(&conn, date)?.ok_or_else(|| {
        DatabaseError::NotFound(format!("No devotional published for {}", date))
    })?;
    Ok(render_devotional(&devotional))
}

fn render_devotional(devotional: &Devotional) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {}\n",
        devotional.publish_date.format(DISPLAY_DATE_FORMAT)
    );
    let _ = writeln!(out, "## {}\n", devotional.scripture_ref);
    let _ = writeln!(out, "> {}\n", devotional.scripture_text);
    let _ = writeln!(out, "{}\n", devotional.reflection);
    if !devotional.prayer_prompt.is_empty() {
        let _ = writeln!(out, "Prayer: {}\n", devotional.prayer_prompt);
    }
    for (idx, question) in devotional.questions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", idx + 1, question);
    }
    out
}

/// Renders the most recent import runs.
pub fn history(db: &Database, limit: usize) -> AppResult<String> {
    let conn = db.get_conn()?;
    let batches = recent_batches(&conn, limit)?;

    if batches.is_empty() {
        return Ok("No imports recorded.\n".to_string());
    }

    let mut out = String::new();
    for batch in &batches {
        out.push_str(&render_batch(batch));
    }
    Ok(out)
}

fn render_batch(batch: &ImportBatch) -> String {
    let state = if batch.finished_at.is_some() {
        "finished"
    } else {
        "interrupted"
    };
    format!(
        "{}  {}  {}: {} of {} committed, {} skipped, {} excluded\n",
        batch.started_at,
        batch.batch_id,
        state,
        batch.committed,
        batch.eligible,
        batch.skipped,
        batch.excluded
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::import::parse_devotional_csv;
    use crate::ops::run_import;
    use crate::Config;
    use tempfile::TempDir;

    fn seeded() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            db_path: temp_dir.path().join("devotionals.db"),
            log_format: "text".to_string(),
        };
        let db = Database::open(&config.db_path).unwrap();
        db.initialize_schema().unwrap();
        let csv = "2026-02-12,John 3:16,For God so loved,Reflect,Pray for a friend,Q1?|Q2?\n\
                   2026-02-13,Psalm 23,The Lord is my shepherd,Rest,,";
        run_import(&config, &db, &parse_devotional_csv(csv), None).unwrap();
        (temp_dir, db)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[test]
    fn test_list_renders_each_devotional() {
        let (_dir, db) = seeded();

        let out = list(&db, None, None).unwrap();

        assert_eq!(
            out,
            "2026-02-12  John 3:16  (2 questions)\n2026-02-13  Psalm 23  (0 questions)\n"
        );
        assert_eq!(
            list(&db, Some(date(13)), None).unwrap(),
            "2026-02-13  Psalm 23  (0 questions)\n"
        );
        assert_eq!(
            list(&db, Some(date(20)), None).unwrap(),
            "No devotionals found.\n"
        );
    }

    #[test]
    fn test_show_renders_full_devotional() {
        let (_dir, db) = seeded();

        let out = show(&db, date(12)).unwrap();

        assert!(out.starts_with("# February 12, 2026: Thursday\n"));
        assert!(out.contains("## John 3:16"));
        assert!(out.contains("> For God so loved"));
        assert!(out.contains("Prayer: Pray for a friend"));
        assert!(out.contains("1. Q1?\n2. Q2?\n"));

        let without_prompt = show(&db, date(13)).unwrap();
        assert!(!without_prompt.contains("Prayer:"));
    }

    #[test]
    fn test_show_missing_date() {
        let (_dir, db) = seeded();

        match show(&db, date(20)) {
            Err(AppError::Database(DatabaseError::NotFound(message))) => {
                assert!(message.contains("2026-02-20"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_history_lists_batches() {
        let (_dir, db) = seeded();

        let out = history(&db, 10).unwrap();

        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("finished: 2 of 2 committed, 0 skipped, 0 excluded"));
    }
}
