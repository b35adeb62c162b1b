//! Where the booklist database lives.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".booklist-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "booklist.db";
/// Environment variable that overrides the default database location.
pub const DB_ENV_VAR: &str = "BOOKLIST_DB";

/// Resolve the database path. Priority: explicit override (the `--db` flag),
/// then `BOOKLIST_DB`, then `~/.booklist-manager/booklist.db`.
pub fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DB_ENV_VAR).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_db_path()
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
