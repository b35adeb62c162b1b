//! Command-line front-end. Input is normalized here, before it reaches the
//! store, so duplicate detection sees one canonical spelling per title and
//! author.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::db::Store;
use crate::error::CatalogError;
use crate::models::{Book, BookUpdate, Category, NewBook, Reminder};
use crate::normalize::{normalize_label, normalize_name};

#[derive(Parser, Debug)]
#[command(name = "booklist", version, about = "Personal book catalog and release reminders")]
pub struct Cli {
    /// Database file (defaults to $BOOKLIST_DB, then ~/.booklist-manager/booklist.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage catalogued books
    Books {
        #[command(subcommand)]
        action: BookAction,
    },

    /// List books whose category equals a value
    Filter {
        /// author, rating, genre or series
        category: Category,
        value: String,
    },

    /// List the distinct values stored for a category
    Values {
        /// author, rating, genre or series
        category: Category,
    },

    /// Manage upcoming release reminders
    Reminders {
        #[command(subcommand)]
        action: ReminderAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookAction {
    /// List every book
    List,
    /// Show a single book
    Show { id: i64 },
    /// Add a book unless the same title and author already exist
    Add(NewBookArgs),
    /// Change rating, genre, series or notes of a book
    Update {
        id: Option<i64>,
        #[command(flatten)]
        fields: BookFieldArgs,
    },
    /// Delete a book
    Delete { id: Option<i64> },
}

#[derive(Args, Debug)]
pub struct NewBookArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long, default_value_t = 0)]
    pub rating: i64,
    #[arg(long, default_value = "")]
    pub genre: String,
    #[arg(long, default_value = "")]
    pub series: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args, Debug, Default)]
pub struct BookFieldArgs {
    #[arg(long)]
    pub rating: Option<i64>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub series: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ReminderAction {
    /// List reminders, soonest first
    List,
    /// Add a reminder for an upcoming release
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        /// Release date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },
    /// Delete a reminder
    Delete { id: Option<i64> },
}

impl From<NewBookArgs> for NewBook {
    fn from(args: NewBookArgs) -> Self {
        NewBook {
            title: normalize_name(&args.title),
            author: normalize_name(&args.author),
            rating: args.rating,
            genre: normalize_label(&args.genre),
            series: normalize_label(&args.series),
            notes: args.notes.trim().to_string(),
        }
    }
}

impl BookFieldArgs {
    fn apply(self, update: &mut BookUpdate) {
        if let Some(rating) = self.rating {
            update.rating = rating;
        }
        if let Some(genre) = self.genre {
            update.genre = normalize_label(&genre);
        }
        if let Some(series) = self.series {
            update.series = normalize_label(&series);
        }
        if let Some(notes) = self.notes {
            update.notes = notes.trim().to_string();
        }
    }
}

/// Turn an optional selection into an id, or report that nothing was chosen.
pub fn require_selection(id: Option<i64>) -> Result<i64, CatalogError> {
    id.ok_or(CatalogError::SelectionMissing)
}

/// Bring a filter value into the shape stored for that category, so it
/// matches what `books add` wrote. Ratings are compared as numbers.
pub fn normalize_filter_value(category: Category, value: &str) -> String {
    match category {
        Category::Author => normalize_name(value),
        Category::Genre | Category::Series => normalize_label(value),
        Category::Rating => value.trim().to_string(),
    }
}

/// Execute one command against an open store, writing human-readable output.
pub fn run(store: &Store, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Books { action } => run_book_action(store, action, out),
        Command::Filter { category, value } => {
            let value = normalize_filter_value(category, &value);
            let books = store.filter_by(category, &value)?;
            if books.is_empty() {
                writeln!(out, "No books with {category} = {value}.")?;
            } else {
                write_books(out, &books)?;
            }
            Ok(())
        }
        Command::Values { category } => {
            for value in store.distinct_values(category)? {
                writeln!(out, "{value}")?;
            }
            Ok(())
        }
        Command::Reminders { action } => run_reminder_action(store, action, out),
    }
}

fn run_book_action(store: &Store, action: BookAction, out: &mut impl Write) -> Result<()> {
    match action {
        BookAction::List => {
            let books = store.fetch_books()?;
            if books.is_empty() {
                writeln!(out, "The booklist is empty.")?;
            } else {
                write_books(out, &books)?;
            }
        }
        BookAction::Show { id } => {
            let book = store
                .fetch_book(id)?
                .ok_or(CatalogError::NotFound { entity: "Book", id })?;
            write_books(out, std::slice::from_ref(&book))?;
        }
        BookAction::Add(args) => {
            let book = store.add_book(NewBook::from(args))?;
            writeln!(out, "Added {} (id {}).", book.display_title(), book.id)?;
        }
        BookAction::Update { id, fields } => {
            let id = require_selection(id)?;
            let book = store
                .fetch_book(id)?
                .ok_or(CatalogError::NotFound { entity: "Book", id })?;
            let mut changes = BookUpdate::from(&book);
            fields.apply(&mut changes);
            store.update_book(id, &changes)?;
            writeln!(out, "Book updated.")?;
        }
        BookAction::Delete { id } => {
            let id = require_selection(id)?;
            if store.delete_book(id)? {
                writeln!(out, "Book deleted.")?;
            } else {
                writeln!(out, "No book with id {id}.")?;
            }
        }
    }
    Ok(())
}

fn run_reminder_action(store: &Store, action: ReminderAction, out: &mut impl Write) -> Result<()> {
    match action {
        ReminderAction::List => {
            let reminders = store.list_reminders()?;
            if reminders.is_empty() {
                writeln!(out, "No reminders set.")?;
            } else {
                write_reminders(out, &reminders)?;
            }
        }
        ReminderAction::Add {
            title,
            author,
            date,
        } => {
            let reminder =
                store.add_reminder(&normalize_name(&title), &normalize_name(&author), date)?;
            writeln!(out, "Reminder set for {} (id {}).", reminder.date, reminder.id)?;
        }
        ReminderAction::Delete { id } => {
            let id = require_selection(id)?;
            if store.remove_reminder(id)? {
                writeln!(out, "Reminder deleted.")?;
            } else {
                writeln!(out, "No reminder with id {id}.")?;
            }
        }
    }
    Ok(())
}

fn write_books(out: &mut impl Write, books: &[Book]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:<28} {:<20} {:>6}  {:<12} {:<16} NOTES",
        "ID", "TITLE", "AUTHOR", "RATING", "GENRE", "SERIES"
    )?;
    for book in books {
        writeln!(
            out,
            "{:>4}  {:<28} {:<20} {:>6}  {:<12} {:<16} {}",
            book.id, book.title, book.author, book.rating, book.genre, book.series, book.notes
        )?;
    }
    Ok(())
}

fn write_reminders(out: &mut impl Write, reminders: &[Reminder]) -> std::io::Result<()> {
    for reminder in reminders {
        writeln!(out, "{:>4}  {reminder}", reminder.id)?;
    }
    Ok(())
}
