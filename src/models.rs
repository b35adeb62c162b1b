//! Domain models that mirror the SQLite schema. They stay plain data holders
//! so the store can hand them out by value and the front-end never holds a
//! reference into the database.

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A catalogued book. `title` and `author` form the identity of the entry
/// and are fixed once inserted; the remaining fields can be edited.
pub struct Book {
    /// Primary key assigned by SQLite.
    pub id: i64,
    /// Title as normalized by the front-end; part of the book's identity.
    pub title: String,
    /// Author, the other half of the identity.
    pub author: String,
    /// Free-form integer score chosen by the user.
    pub rating: i64,
    /// Empty string when unknown, never null.
    pub genre: String,
    /// Series name, empty for standalone books.
    pub series: String,
    /// Notes are stored verbatim, without normalization.
    pub notes: String,
}

impl Book {
    /// `Title - Author`, the label used when listing books.
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.title, self.author)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Field values for a book that has not been inserted yet.
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub rating: i64,
    pub genre: String,
    pub series: String,
    pub notes: String,
}

impl NewBook {
    /// Shorthand for the common case where only the identity and rating are
    /// known up front.
    pub fn new(title: impl Into<String>, author: impl Into<String>, rating: i64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            rating,
            ..Self::default()
        }
    }

    /// Set the genre.
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Set the series name.
    pub fn series(mut self, series: impl Into<String>) -> Self {
        self.series = series.into();
        self
    }

    /// Set the free-text notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Reject blank titles and authors before anything touches the store.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::MissingField("Title"));
        }
        if self.author.trim().is_empty() {
            return Err(CatalogError::MissingField("Author"));
        }
        Ok(())
    }

    pub(crate) fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            rating: self.rating,
            genre: self.genre,
            series: self.series,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The editable part of a book.
pub struct BookUpdate {
    /// Replaces [`Book::rating`]; likewise for the fields below.
    pub rating: i64,
    pub genre: String,
    pub series: String,
    pub notes: String,
}

impl From<&Book> for BookUpdate {
    /// Start an edit from the current values so untouched fields survive.
    fn from(book: &Book) -> Self {
        Self {
            rating: book.rating,
            genre: book.genre.clone(),
            series: book.series.clone(),
            notes: book.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An upcoming release the user wants to be reminded about.
pub struct Reminder {
    /// Primary key assigned by SQLite.
    pub id: i64,
    /// `yyyy-MM-dd`, which sorts chronologically as plain text.
    pub date: String,
    /// Title of the upcoming release.
    pub title: String,
    pub author: String,
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {} - {}", self.date, self.title, self.author)
    }
}

/// Book attributes that can be used as a filter key. Column names cannot be
/// bound as parameters, so this enum is the allow-list that gets interpolated
/// into filter queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Author,
    Rating,
    Genre,
    Series,
}

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 4] = [
        Category::Author,
        Category::Rating,
        Category::Genre,
        Category::Series,
    ];

    /// Column in the `books` table backing this category.
    pub fn column(self) -> &'static str {
        match self {
            Category::Author => "author",
            Category::Rating => "rating",
            Category::Genre => "genre",
            Category::Series => "series",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.column().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::InvalidCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Genre".parse::<Category>().unwrap(), Category::Genre);
        assert_eq!(" rating ".parse::<Category>().unwrap(), Category::Rating);
    }

    #[test]
    fn category_rejects_columns_outside_the_allow_list() {
        for input in ["notes", "title", "id", "author; DROP TABLE books"] {
            let err = input.parse::<Category>().unwrap_err();
            assert!(matches!(err, CatalogError::InvalidCategory(_)), "{input}");
        }
    }

    #[test]
    fn new_book_requires_title_and_author() {
        let missing_title = NewBook::new("  ", "Herbert", 3);
        assert!(matches!(
            missing_title.validate(),
            Err(CatalogError::MissingField("Title"))
        ));

        let missing_author = NewBook::new("Dune", "", 3);
        assert!(matches!(
            missing_author.validate(),
            Err(CatalogError::MissingField("Author"))
        ));

        assert!(NewBook::new("Dune", "Herbert", 3).validate().is_ok());
    }

    #[test]
    fn book_update_starts_from_current_values() {
        let book = NewBook::new("Dune", "Herbert", 5)
            .genre("Scifi")
            .notes("great")
            .into_book(1);
        let update = BookUpdate::from(&book);
        assert_eq!(update.rating, 5);
        assert_eq!(update.genre, "Scifi");
        assert_eq!(update.series, "");
        assert_eq!(update.notes, "great");
    }
}
