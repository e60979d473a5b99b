//! Devotional CRUD operations.
//!
//! Devotionals are keyed by publish date: writing a devotional for a date
//! that already has one replaces it.

use super::DbResult;
use crate::constants::DATE_FORMAT_ISO;
use crate::errors::DatabaseError;
use crate::publish::{NewDevotional, PublishOutcome};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use tracing::debug;

/// A devotional as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Devotional {
    pub id: i64,
    pub publish_date: NaiveDate,
    pub scripture_ref: String,
    pub scripture_text: String,
    pub reflection: String,
    pub prayer_prompt: String,
    pub questions: Vec<String>,
    pub checksum: String,
    pub created_at: String,
    pub updated_at: String,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, publish_date, scripture_ref, scripture_text, reflection,
           prayer_prompt, questions, checksum, created_at, updated_at
    FROM devotionals
"#;

/// Inserts or replaces the devotional for `devotional.publish_date`.
///
/// Writing identical content again is a no-op reported as
/// [`PublishOutcome::Unchanged`].
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_devotional(conn: &Connection, devotional: &NewDevotional) -> DbResult<PublishOutcome> {
    let date = devotional.publish_date.format(DATE_FORMAT_ISO).to_string();
    let checksum = devotional.checksum();
    let questions = serde_json::to_string(&devotional.questions).map_err(|e| {
        DatabaseError::Custom(format!("Failed to encode questions for {}: {}", date, e))
    })?;

    debug!("Upserting devotional for {} with checksum {}", date, checksum);

    let tx = conn.unchecked_transaction()?;

    let existing: Option<String> = tx
        .query_row(
            "SELECT checksum FROM devotionals WHERE publish_date = ?1",
            params![date],
            |row| row.get(0),
        )
        .optional()?;

    let outcome = match existing {
        Some(stored) if stored == checksum => PublishOutcome::Unchanged,
        Some(_) => {
            tx.execute(
                r#"
                UPDATE devotionals SET
                    scripture_ref = ?2,
                    scripture_text = ?3,
                    reflection = ?4,
                    prayer_prompt = ?5,
                    questions = ?6,
                    checksum = ?7,
                    updated_at = CURRENT_TIMESTAMP
                WHERE publish_date = ?1
                "#,
                params![
                    date,
                    devotional.scripture_ref,
                    devotional.scripture_text,
                    devotional.reflection,
                    devotional.prayer_prompt,
                    questions,
                    checksum
                ],
            )?;
            PublishOutcome::Updated
        }
        None => {
            tx.execute(
                r#"
                INSERT INTO devotionals
                    (publish_date, scripture_ref, scripture_text, reflection, prayer_prompt, questions, checksum)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    date,
                    devotional.scripture_ref,
                    devotional.scripture_text,
                    devotional.reflection,
                    devotional.prayer_prompt,
                    questions,
                    checksum
                ],
            )?;
            PublishOutcome::Created
        }
    };

    tx.commit()?;

    debug!("Devotional for {} {}", date, outcome);
    Ok(outcome)
}

/// Retrieves the devotional published on `date`.
///
/// Returns `Ok(None)` if there is none.
pub fn get_devotional_by_date(conn: &Connection, date: NaiveDate) -> DbResult<Option<Devotional>> {
    debug!("Getting devotional for date {}", date);

    let sql = format!("{} WHERE publish_date = ?1", SELECT_COLUMNS);
    let devotional = conn
        .query_row(
            &sql,
            params![date.format(DATE_FORMAT_ISO).to_string()],
            row_to_devotional,
        )
        .optional()?;

    Ok(devotional)
}

/// Lists devotionals in ascending date order, optionally bounded (inclusive).
pub fn list_devotionals(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> DbResult<Vec<Devotional>> {
    debug!("Listing devotionals from {:?} to {:?}", from, to);

    let sql = format!(
        "{} WHERE (?1 IS NULL OR publish_date >= ?1) AND (?2 IS NULL OR publish_date <= ?2) ORDER BY publish_date ASC",
        SELECT_COLUMNS
    );
    let from = from.map(|d| d.format(DATE_FORMAT_ISO).to_string());
    let to = to.map(|d| d.format(DATE_FORMAT_ISO).to_string());

    let mut stmt = conn.prepare(&sql)?;
    let devotionals = stmt
        .query_map(params![from, to], row_to_devotional)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(devotionals)
}

/// Counts stored devotionals.
pub fn count_devotionals(conn: &Connection) -> DbResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM devotionals", [], |row| row.get(0))?;
    Ok(count)
}

fn row_to_devotional(row: &Row<'_>) -> rusqlite::Result<Devotional> {
    let date_str: String = row.get(1)?;
    let publish_date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT_ISO).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let questions_json: String = row.get(6)?;
    let questions: Vec<String> = serde_json::from_str(&questions_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Devotional {
        id: row.get(0)?,
        publish_date,
        scripture_ref: row.get(2)?,
        scripture_text: row.get(3)?,
        reflection: row.get(4)?,
        prayer_prompt: row.get(5)?,
        questions,
        checksum: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn devotional(on: NaiveDate, reflection: &str) -> NewDevotional {
        NewDevotional {
            scripture_ref: "John 3:16".to_string(),
            scripture_text: "For God so loved the world".to_string(),
            reflection: reflection.to_string(),
            prayer_prompt: "Pray for a neighbour".to_string(),
            questions: vec!["Q1?".to_string(), "Q2?".to_string()],
            publish_date: on,
        }
    }

    #[test]
    fn test_upsert_and_get_by_date() {
        let conn = setup();
        let new = devotional(date(2026, 2, 12), "Reflect");

        assert_eq!(upsert_devotional(&conn, &new).unwrap(), PublishOutcome::Created);

        let stored = get_devotional_by_date(&conn, date(2026, 2, 12))
            .unwrap()
            .unwrap();
        assert_eq!(stored.publish_date, date(2026, 2, 12));
        assert_eq!(stored.scripture_ref, "John 3:16");
        assert_eq!(stored.questions, vec!["Q1?", "Q2?"]);
        assert_eq!(stored.checksum, new.checksum());
    }

    #[test]
    fn test_get_missing_date_returns_none() {
        let conn = setup();
        assert!(get_devotional_by_date(&conn, date(2026, 2, 12))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_reupsert_same_content_is_unchanged() {
        let conn = setup();
        let new = devotional(date(2026, 2, 12), "Reflect");

        upsert_devotional(&conn, &new).unwrap();
        assert_eq!(upsert_devotional(&conn, &new).unwrap(), PublishOutcome::Unchanged);
        assert_eq!(count_devotionals(&conn).unwrap(), 1);
    }

    #[test]
    fn test_reupsert_changed_content_updates_in_place() {
        let conn = setup();
        upsert_devotional(&conn, &devotional(date(2026, 2, 12), "First")).unwrap();
        let first_id = get_devotional_by_date(&conn, date(2026, 2, 12))
            .unwrap()
            .unwrap()
            .id;

        let outcome = upsert_devotional(&conn, &devotional(date(2026, 2, 12), "Second")).unwrap();
        assert_eq!(outcome, PublishOutcome::Updated);

        let stored = get_devotional_by_date(&conn, date(2026, 2, 12))
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, first_id);
        assert_eq!(stored.reflection, "Second");
        assert_eq!(count_devotionals(&conn).unwrap(), 1);
    }

    #[test]
    fn test_list_devotionals_in_range() {
        let conn = setup();
        for day in [14, 12, 13, 15] {
            upsert_devotional(&conn, &devotional(date(2026, 2, day), "Reflect")).unwrap();
        }

        let all = list_devotionals(&conn, None, None).unwrap();
        let days: Vec<_> = all.iter().map(|d| d.publish_date).collect();
        assert_eq!(
            days,
            vec![
                date(2026, 2, 12),
                date(2026, 2, 13),
                date(2026, 2, 14),
                date(2026, 2, 15)
            ]
        );

        let bounded = list_devotionals(&conn, Some(date(2026, 2, 13)), Some(date(2026, 2, 14))).unwrap();
        assert_eq!(bounded.len(), 2);

        let open_ended = list_devotionals(&conn, Some(date(2026, 2, 15)), None).unwrap();
        assert_eq!(open_ended.len(), 1);
    }

    #[test]
    fn test_empty_questions_round_trip() {
        let conn = setup();
        let mut new = devotional(date(2026, 2, 12), "Reflect");
        new.questions.clear();
        upsert_devotional(&conn, &new).unwrap();

        let stored = get_devotional_by_date(&conn, date(2026, 2, 12))
            .unwrap()
            .unwrap();
        assert!(stored.questions.is_empty());
    }
}
