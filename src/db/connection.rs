use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::CatalogError;

/// Owner of the single SQLite connection. Components borrow the store rather
/// than reaching for a global, and the file handle is released when the
/// store is dropped (or explicitly via [`Store::close`]).
pub struct Store {
    pub(super) conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path`, creating its parent
    /// directory when missing, and make sure the persistent tables exist.
    ///
    /// A data directory that cannot be created, a file that cannot be opened,
    /// or one that turns out not to be a SQLite database, all yield
    /// [`CatalogError::ConnectionFailure`]; no store value exists afterwards
    /// so nothing else can run against a broken handle.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| connection_failure(path, source))?;
        }

        let conn = Connection::open(path).map_err(|source| connection_failure(path, source))?;
        check_readable(&conn).map_err(|source| connection_failure(path, source))?;
        info!(path = %path.display(), "opened booklist database");

        Self::init(conn)
    }

    /// Open a throwaway database that lives only as long as the store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|source| connection_failure(Path::new(":memory:"), source))?;
        debug!("opened in-memory booklist database");
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.ensure_books_table()?;
        store.ensure_calendar_table()?;
        // A filter interrupted by a crash can leave the scratch table behind.
        store.discard_stale_filter_table()?;
        Ok(store)
    }

    /// Borrow the underlying connection so tests can inspect the schema.
    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, surfacing any error SQLite reports while
    /// flushing. Dropping the store closes it too but swallows that error.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .context("failed to close SQLite database")
    }
}

/// Touch the schema so a garbage or unreadable file fails here rather than on
/// the first real statement.
fn check_readable(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(())
}

fn connection_failure(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> CatalogError {
    CatalogError::ConnectionFailure {
        path: PathBuf::from(path),
        source: source.into(),
    }
}
