//! Persistence layer split across logical submodules. Each submodule adds an
//! `impl Store` block for one concern: schema, raw statements, books,
//! filtering and reminders.

mod books;
mod connection;
mod filter;
mod records;
mod reminders;
mod schema;

pub use connection::Store;
pub use records::RawRow;
pub use reminders::REMINDER_DATE_FORMAT;
