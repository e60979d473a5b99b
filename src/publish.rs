//! The publish seam between the importer and wherever devotionals live.
//!
//! The importer only knows the [`Publisher`] trait. [`DatabasePublisher`]
//! writes into the local SQLite store; tests substitute in-memory fakes.

use crate::db::devotionals::upsert_devotional;
use crate::db::Database;
use crate::errors::PublishError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Everything needed to publish one devotional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDevotional {
    pub scripture_ref: String,
    pub scripture_text: String,
    pub reflection: String,
    pub prayer_prompt: String,
    pub questions: Vec<String>,
    /// The day the devotional is shown to readers; unique per store.
    pub publish_date: NaiveDate,
}

impl NewDevotional {
    /// BLAKE3 checksum of the content, used to detect unchanged re-imports.
    ///
    /// Fields are separated by the ASCII unit separator so that moving text
    /// between adjacent fields changes the checksum.
    pub fn checksum(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.publish_date.to_string().as_bytes());
        for part in [
            &self.scripture_ref,
            &self.scripture_text,
            &self.reflection,
            &self.prayer_prompt,
        ] {
            hasher.update(b"\x1f");
            hasher.update(part.as_bytes());
        }
        for question in &self.questions {
            hasher.update(b"\x1e");
            hasher.update(question.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// What a successful publish did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishOutcome {
    /// No devotional existed for the date.
    Created,
    /// A devotional for the date was replaced with new content.
    Updated,
    /// The stored devotional already had identical content.
    Unchanged,
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PublishOutcome::Created => "created",
            PublishOutcome::Updated => "updated",
            PublishOutcome::Unchanged => "unchanged",
        };
        f.write_str(label)
    }
}

/// Publishes one devotional at a time.
pub trait Publisher {
    /// Publishes `devotional`, keyed by its publish date.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] when the devotional could not be stored. The
    /// caller decides whether that ends the batch.
    fn publish(&mut self, devotional: &NewDevotional) -> Result<PublishOutcome, PublishError>;
}

/// Publishes into the local SQLite store.
pub struct DatabasePublisher<'a> {
    db: &'a Database,
}

impl<'a> DatabasePublisher<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl Publisher for DatabasePublisher<'_> {
    fn publish(&mut self, devotional: &NewDevotional) -> Result<PublishOutcome, PublishError> {
        debug!("Publishing devotional for {}", devotional.publish_date);
        let conn = self.db.get_conn()?;
        let outcome = upsert_devotional(&conn, devotional)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> NewDevotional {
        NewDevotional {
            scripture_ref: "Psalm 23:1".to_string(),
            scripture_text: "The Lord is my shepherd".to_string(),
            reflection: "Rest".to_string(),
            prayer_prompt: "Give thanks".to_string(),
            questions: vec!["Where do you need rest?".to_string()],
            publish_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_checksum_is_stable_and_content_sensitive() {
        let a = sample();
        assert_eq!(a.checksum(), sample().checksum());

        let mut b = sample();
        b.reflection.push('!');
        assert_ne!(a.checksum(), b.checksum());

        let mut shifted = sample();
        shifted.scripture_ref = "Psalm 23:1The Lord".to_string();
        shifted.scripture_text = " is my shepherd".to_string();
        assert_ne!(a.checksum(), shifted.checksum());
    }

    #[test]
    fn test_database_publisher_reports_outcomes() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        db.initialize_schema().unwrap();
        let mut publisher = DatabasePublisher::new(&db);

        let devotional = sample();
        assert_eq!(publisher.publish(&devotional).unwrap(), PublishOutcome::Created);
        assert_eq!(publisher.publish(&devotional).unwrap(), PublishOutcome::Unchanged);

        let mut changed = sample();
        changed.prayer_prompt = "Sit in silence".to_string();
        assert_eq!(publisher.publish(&changed).unwrap(), PublishOutcome::Updated);
    }

    #[test]
    fn test_database_publisher_fails_without_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        let mut publisher = DatabasePublisher::new(&db);

        let result = publisher.publish(&sample());
        assert!(matches!(result, Err(PublishError::Database(_))));
    }
}
