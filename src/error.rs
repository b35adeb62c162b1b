//! Conditions callers are expected to tell apart. Store functions return
//! `anyhow::Result`, so these travel inside an `anyhow::Error` and are
//! recovered with `err.downcast_ref::<CatalogError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The database file, or the directory holding it, could not be opened
    /// or created. `source` is the underlying I/O or SQLite error.
    #[error("failed to open booklist database at {}", .path.display())]
    ConnectionFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A book with the same title and author is already catalogued.
    #[error("\"{title}\" by {author} is already in the booklist.")]
    Duplicate { title: String, author: String },

    /// Filtering was requested on something other than author, rating,
    /// genre or series.
    #[error("Unknown category \"{0}\". Choose author, rating, genre or series.")]
    InvalidCategory(String),

    /// A title or author was left blank.
    #[error("{0} is required.")]
    MissingField(&'static str),

    /// Update or delete was requested without choosing a record first.
    #[error("No record selected.")]
    SelectionMissing,

    /// An update targeted an id with no matching row.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}
