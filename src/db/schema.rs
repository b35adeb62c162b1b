use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::Store;

impl Store {
    /// Create the `books` table if it does not exist yet.
    pub fn ensure_books_table(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS books (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    author TEXT NOT NULL,
                    rating INTEGER NOT NULL,
                    genre TEXT NOT NULL,
                    series TEXT NOT NULL,
                    notes TEXT NOT NULL
                )",
                [],
            )
            .context("failed to create books table")?;
        Ok(())
    }

    /// Create the `calendar` table holding release reminders.
    pub fn ensure_calendar_table(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS calendar (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    date TEXT NOT NULL,
                    title TEXT NOT NULL,
                    author TEXT NOT NULL
                )",
                [],
            )
            .context("failed to create calendar table")?;
        Ok(())
    }

    /// Create the `results` scratch table. It mirrors `books` except that ids
    /// are copied from the source rows instead of being generated. Filtering
    /// no longer goes through it; the table is kept so databases shared with
    /// older builds keep the same layout.
    pub fn ensure_filter_table(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS results (
                    id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    author TEXT NOT NULL,
                    rating INTEGER NOT NULL,
                    genre TEXT NOT NULL,
                    series TEXT NOT NULL,
                    notes TEXT NOT NULL
                )",
                [],
            )
            .context("failed to create results table")?;
        Ok(())
    }

    /// Drop the `results` scratch table if present.
    pub fn drop_filter_table(&self) -> Result<()> {
        self.conn
            .execute("DROP TABLE IF EXISTS results", [])
            .context("failed to drop results table")?;
        Ok(())
    }

    /// Check `sqlite_master` for a table with the given name.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [name],
                |row| row.get(0),
            )
            .with_context(|| format!("failed to look up table {name}"))
    }

    /// Drop a `results` table left over from an interrupted filter, logging
    /// a warning when one is found.
    pub(super) fn discard_stale_filter_table(&self) -> Result<()> {
        if self.table_exists("results")? {
            warn!("discarding leftover results table from an interrupted filter");
            self.drop_filter_table()?;
        } else {
            debug!("no leftover results table");
        }
        Ok(())
    }
}
