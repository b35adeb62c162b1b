use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::params;
use tracing::{debug, info};

use super::Store;
use crate::error::CatalogError;
use crate::models::Reminder;

/// Text form used for the `date` column. Zero-padded so that sorting the
/// column as text is also chronological.
pub const REMINDER_DATE_FORMAT: &str = "%Y-%m-%d";

impl Store {
    /// Record an upcoming release. Reminders have no update path; a wrong
    /// entry is removed and added again.
    pub fn add_reminder(&self, title: &str, author: &str, date: NaiveDate) -> Result<Reminder> {
        if title.trim().is_empty() {
            return Err(CatalogError::MissingField("Title").into());
        }
        if author.trim().is_empty() {
            return Err(CatalogError::MissingField("Author").into());
        }

        let date = date.format(REMINDER_DATE_FORMAT).to_string();
        self.insert(
            "INSERT INTO calendar (title, author, date) VALUES (?1, ?2, ?3)",
            params![title, author, date],
        )
        .context("failed to insert reminder")?;

        let id = self.conn.last_insert_rowid();
        info!(id, %date, "added reminder");
        Ok(Reminder {
            id,
            date,
            title: title.to_string(),
            author: author.to_string(),
        })
    }

    /// Delete a reminder by id. Returns whether a row was removed.
    pub fn remove_reminder(&self, id: i64) -> Result<bool> {
        let deleted = self
            .delete_parameterized("DELETE FROM calendar WHERE id = ?1", params![id])
            .context("failed to delete reminder")?;
        debug!(id, deleted, "remove reminder");
        Ok(deleted > 0)
    }

    /// All reminders, soonest first. Reminders on the same day keep the order
    /// they were added in.
    pub fn list_reminders(&self) -> Result<Vec<Reminder>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, title, author FROM calendar ORDER BY date ASC, id ASC")
            .context("failed to prepare reminder query")?;

        let reminders = stmt
            .query_map([], |row| {
                Ok(Reminder {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    title: row.get(2)?,
                    author: row.get(3)?,
                })
            })
            .context("failed to load reminders")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect reminders")?;

        Ok(reminders)
    }
}
