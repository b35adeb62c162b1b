//! Core library for the booklist manager: a single-file SQLite store for book
//! records and release reminders, with category filtering on top.
//!
//! The `booklist` binary is a thin command-line layer over these modules.
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;

/// The store handle every operation goes through.
pub use db::Store;

pub use error::CatalogError;
pub use models::{Book, BookUpdate, Category, NewBook, Reminder};
