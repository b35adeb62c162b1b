//! Statement-level primitives shared by the typed book and reminder helpers.
//! Every mutation runs in SQLite's autocommit mode, so it is durable once the
//! call returns and there is nothing to roll back afterwards.

use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::Params;
use tracing::debug;

use super::Store;

/// One result row as plain values, in column order.
pub type RawRow = Vec<Value>;

impl Store {
    /// Run a parameterized `INSERT`, returning the number of rows written.
    pub fn insert<P: Params>(&self, sql: &str, values: P) -> Result<usize> {
        debug!(sql, "insert");
        self.conn
            .execute(sql, values)
            .with_context(|| format!("failed to run insert: {sql}"))
    }

    /// Run a read with no bound values. The statement text is used verbatim,
    /// so it must never contain user input.
    pub fn select(&self, sql: &str) -> Result<Vec<RawRow>> {
        self.select_parameterized(sql, [])
    }

    /// Run a read with bound values and collect every row.
    pub fn select_parameterized<P: Params>(&self, sql: &str, values: P) -> Result<Vec<RawRow>> {
        debug!(sql, "select");
        let mut stmt = self
            .conn
            .prepare(sql)
            .with_context(|| format!("failed to prepare query: {sql}"))?;
        let columns = stmt.column_count();

        let rows = stmt
            .query_map(values, |row| {
                (0..columns)
                    .map(|index| row.get::<_, Value>(index))
                    .collect::<rusqlite::Result<RawRow>>()
            })
            .context("failed to run query")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect rows")?;

        Ok(rows)
    }

    /// Run a parameterized `UPDATE`, returning the number of rows touched.
    pub fn update<P: Params>(&self, sql: &str, values: P) -> Result<usize> {
        debug!(sql, "update");
        self.conn
            .execute(sql, values)
            .with_context(|| format!("failed to run update: {sql}"))
    }

    /// Run a mutation with no bound values, such as `DROP TABLE`. Like
    /// [`Store::select`], the text must not carry user input.
    pub fn delete(&self, sql: &str) -> Result<usize> {
        self.delete_parameterized(sql, [])
    }

    /// Run a parameterized `DELETE`, returning the number of rows removed.
    pub fn delete_parameterized<P: Params>(&self, sql: &str, values: P) -> Result<usize> {
        debug!(sql, "delete");
        self.conn
            .execute(sql, values)
            .with_context(|| format!("failed to run delete: {sql}"))
    }
}
