use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::Store;
use crate::error::CatalogError;
use crate::models::{Book, BookUpdate, NewBook};

/// Column list shared by every query that hydrates a [`Book`].
pub(super) const BOOK_COLUMNS: &str = "id, title, author, rating, genre, series, notes";

pub(super) fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        rating: row.get(3)?,
        genre: row.get(4)?,
        series: row.get(5)?,
        notes: row.get(6)?,
    })
}

impl Store {
    /// Ids of books whose title and author match exactly. Normalizing the
    /// inputs is up to the caller; an empty result means the pair is free.
    pub fn find_duplicate(&self, title: &str, author: &str) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM books WHERE title = ?1 AND author = ?2")
            .context("failed to prepare duplicate query")?;

        let ids = stmt
            .query_map(params![title, author], |row| row.get(0))
            .context("failed to look up duplicates")?
            .collect::<Result<Vec<i64>, _>>()
            .context("failed to collect duplicate ids")?;

        Ok(ids)
    }

    /// Insert a book unless the same title and author are already catalogued,
    /// in which case [`CatalogError::Duplicate`] is returned and nothing is
    /// written. The check is advisory: the schema carries no uniqueness
    /// constraint of its own.
    pub fn add_book(&self, book: NewBook) -> Result<Book> {
        book.validate()?;

        let duplicates = self.find_duplicate(&book.title, &book.author)?;
        if !duplicates.is_empty() {
            debug!(?duplicates, "rejected duplicate book");
            return Err(CatalogError::Duplicate {
                title: book.title,
                author: book.author,
            }
            .into());
        }

        self.insert(
            "INSERT INTO books (title, author, rating, genre, series, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                book.title,
                book.author,
                book.rating,
                book.genre,
                book.series,
                book.notes
            ],
        )
        .context("failed to insert book")?;

        let id = self.conn.last_insert_rowid();
        info!(id, title = %book.title, "added book");
        Ok(book.into_book(id))
    }

    /// Every book in insertion order.
    pub fn fetch_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))
            .context("failed to prepare book query")?;

        let books = stmt
            .query_map([], book_from_row)
            .context("failed to load books")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect books")?;

        Ok(books)
    }

    /// Look up one book by id; `None` when no row has that id.
    pub fn fetch_book(&self, id: i64) -> Result<Option<Book>> {
        self.conn
            .query_row(
                &format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
                [id],
                book_from_row,
            )
            .optional()
            .context("failed to load book")
    }

    /// Number of rows in the `books` table.
    pub fn count_books(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .context("failed to count books")
    }

    /// Overwrite rating, genre, series and notes. Title and author are the
    /// book's identity and stay as inserted.
    pub fn update_book(&self, id: i64, changes: &BookUpdate) -> Result<()> {
        let updated = self
            .update(
                "UPDATE books SET rating = ?1, genre = ?2, series = ?3, notes = ?4 WHERE id = ?5",
                params![changes.rating, changes.genre, changes.series, changes.notes, id],
            )
            .context("failed to update book")?;

        if updated == 0 {
            Err(CatalogError::NotFound { entity: "Book", id }.into())
        } else {
            Ok(())
        }
    }

    /// Remove the book with this id. Returns whether a row was removed; an
    /// unknown id is not an error.
    pub fn delete_book(&self, id: i64) -> Result<bool> {
        let deleted = self
            .delete_parameterized("DELETE FROM books WHERE id = ?1", params![id])
            .context("failed to delete book")?;
        debug!(id, deleted, "delete book");
        Ok(deleted > 0)
    }
}
