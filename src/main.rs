//! Binary entry point: parse arguments, open the booklist database, run one
//! command and close the store again.
use std::io;

use booklist_manager::cli::{self, Cli};
use booklist_manager::config::resolve_db_path;
use booklist_manager::Store;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Returning a `Result` bubbles fatal problems (for example an unreadable
/// database file) up to the terminal instead of continuing with a broken
/// store. Recoverable conditions such as duplicates print the same way and
/// leave the database untouched.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    let db_path = resolve_db_path(args.db)?;
    tracing::debug!(path = %db_path.display(), "resolved database path");

    let store = Store::open(&db_path)?;
    let mut stdout = io::stdout().lock();
    let outcome = cli::run(&store, args.command, &mut stdout);
    store.close()?;
    outcome
}
