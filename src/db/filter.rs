use std::collections::BTreeSet;

use anyhow::{Context, Result};
use rusqlite::types::Value;
use tracing::debug;

use super::books::{book_from_row, BOOK_COLUMNS};
use super::Store;
use crate::models::{Book, Category};
use crate::normalize::remove_punctuation;

impl Store {
    /// Books whose `category` column equals `value`, ordered by id.
    ///
    /// The column comes from the [`Category`] allow-list and the value is
    /// always bound. Ratings are compared numerically when the value parses
    /// as an integer. The books table is only read, and no `results` table
    /// is left behind once the call returns.
    pub fn filter_by(&self, category: Category, value: &str) -> Result<Vec<Book>> {
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE {} = ?1 ORDER BY id",
            category.column()
        );
        let bound = bind_value(category, value);
        debug!(%category, ?bound, "filter books");

        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("failed to prepare filter query")?;

        let books = stmt
            .query_map([bound], book_from_row)
            .with_context(|| format!("failed to filter books by {category}"))?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect filtered books")?;

        self.drop_filter_table()?;
        Ok(books)
    }

    /// Every distinct value present in the `category` column, punctuation
    /// stripped, for building a pick list. Ratings come back as their decimal
    /// text.
    ///
    /// [`Store::filter_by`] matches exactly, so a listed value only finds its
    /// books when they were stored without punctuation. The CLI guarantees
    /// that by normalizing input; callers writing through the library
    /// directly must do the same.
    pub fn distinct_values(&self, category: Category) -> Result<BTreeSet<String>> {
        let rows = self
            .select(&format!("SELECT {} FROM books", category.column()))
            .with_context(|| format!("failed to list {category} values"))?;

        let values = rows
            .into_iter()
            .flatten()
            .map(|value| remove_punctuation(&value_text(value)))
            .collect();

        Ok(values)
    }
}

fn bind_value(category: Category, value: &str) -> Value {
    match category {
        Category::Rating => match value.trim().parse::<i64>() {
            Ok(rating) => Value::Integer(rating),
            Err(_) => Value::Text(value.to_string()),
        },
        _ => Value::Text(value.to_string()),
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(number) => number.to_string(),
        Value::Real(number) => number.to_string(),
        Value::Text(text) => text,
        Value::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;
    use crate::normalize::normalize_name;

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let books = [
            NewBook::new("The Hobbit", "Tolkien", 5).genre("Fantasy").series("Middle Earth"),
            NewBook::new("Dune", "Herbert", 5).genre("SciFi").series("Dune"),
            NewBook::new("Earthsea", "Le Guin", 4).genre("Fantasy"),
            NewBook::new("Emma", "Austen", 3).genre("Classic"),
            NewBook::new("The Silmarillion", "Tolkien", 3).genre("Fantasy").series("Middle Earth"),
        ];
        for book in books {
            store.add_book(book).unwrap();
        }
        store
    }

    #[test]
    fn filter_returns_matching_subset_in_id_order() {
        let store = seeded_store();
        let before = store.fetch_books().unwrap();

        let fantasy = store.filter_by(Category::Genre, "Fantasy").unwrap();
        let ids: Vec<i64> = fantasy.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert!(fantasy.iter().all(|book| book.genre == "Fantasy"));

        assert_eq!(store.fetch_books().unwrap(), before);
        assert!(!store.table_exists("results").unwrap());
    }

    #[test]
    fn filter_by_rating_compares_numbers() {
        let store = seeded_store();
        let ids: Vec<i64> = store
            .filter_by(Category::Rating, " 5 ")
            .unwrap()
            .into_iter()
            .map(|book| book.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        assert!(store.filter_by(Category::Rating, "five").unwrap().is_empty());
    }

    #[test]
    fn filter_with_no_matches_is_empty() {
        let store = seeded_store();
        assert!(store.filter_by(Category::Author, "Nobody").unwrap().is_empty());
        assert!(!store.table_exists("results").unwrap());
    }

    #[test]
    fn filter_value_is_bound_not_interpolated() {
        let store = seeded_store();
        let hostile = "x\" OR 1=1; DROP TABLE books; --";
        assert!(store.filter_by(Category::Series, hostile).unwrap().is_empty());
        assert_eq!(store.count_books().unwrap(), 5);
    }

    #[test]
    fn filter_clears_a_leftover_scratch_table() {
        let store = seeded_store();
        store.ensure_filter_table().unwrap();
        store.filter_by(Category::Author, "Tolkien").unwrap();
        assert!(!store.table_exists("results").unwrap());
    }

    #[test]
    fn repeated_filters_are_independent() {
        let store = seeded_store();
        let first = store.filter_by(Category::Author, "Tolkien").unwrap();
        let second = store.filter_by(Category::Author, "Herbert").unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].title, "Dune");
    }

    #[test]
    fn distinct_values_have_set_semantics() {
        let store = seeded_store();

        let genres = store.distinct_values(Category::Genre).unwrap();
        let expected: BTreeSet<String> = ["Classic", "Fantasy", "SciFi"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(genres, expected);

        let ratings = store.distinct_values(Category::Rating).unwrap();
        assert_eq!(ratings.into_iter().collect::<Vec<_>>(), vec!["3", "4", "5"]);
    }

    #[test]
    fn distinct_values_include_blank_entries() {
        let store = seeded_store();
        let series = store.distinct_values(Category::Series).unwrap();
        assert!(series.contains(""));
        assert!(series.contains("Middle Earth"));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn distinct_values_strip_punctuation() {
        let store = Store::open_in_memory().unwrap();
        store
            .add_book(NewBook::new("Ubik", "Philip K. Dick", 4))
            .unwrap();
        let authors = store.distinct_values(Category::Author).unwrap();
        assert!(authors.contains("Philip K Dick"));
    }

    #[test]
    fn listed_value_only_matches_books_stored_without_punctuation() {
        let store = Store::open_in_memory().unwrap();
        store
            .add_book(NewBook::new("Ubik", "Philip K. Dick", 4))
            .unwrap();
        store
            .add_book(NewBook::new(
                normalize_name("Valis"),
                normalize_name("Philip K. Dick"),
                3,
            ))
            .unwrap();

        let authors = store.distinct_values(Category::Author).unwrap();
        assert_eq!(authors.len(), 1);
        let listed = authors.into_iter().next().unwrap();

        let matched: Vec<String> = store
            .filter_by(Category::Author, &listed)
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(matched, vec!["Valis"]);
    }
}
