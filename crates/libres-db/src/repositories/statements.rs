//! Fixed-shape SQL statements for the `reservation` table.
//!
//! Every value is bound through `QueryBuilder::push_bind`; only the
//! compile-time table and column names are spliced into the SQL text.

use libres_core::{NewReservation, RepositoryError};
use sqlx::{QueryBuilder, Sqlite};

pub const RESERVATION_TABLE: &str = "reservation";

/// Columns written by the insert, in bind order.
pub const RESERVATION_INSERT_COLUMNS: &str =
    "reservation_uid, username, book_uid, library_uid, status, start_date, till_date";

/// Shared SELECT column list for reservation queries.
pub const RESERVATION_SELECT_COLUMNS: &str =
    "id, reservation_uid, username, book_uid, library_uid, status, start_date, till_date";

/// Equality terms joined with `AND`.
#[derive(Debug, Default)]
pub struct EqFilter<'a> {
    terms: Vec<(&'static str, &'a str)>,
}

impl<'a> EqFilter<'a> {
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Require `column = value`.
    #[must_use]
    pub fn eq(mut self, column: &'static str, value: &'a str) -> Self {
        self.terms.push((column, value));
        self
    }

    /// Append ` WHERE a = ? AND b = ?`.
    ///
    /// An empty filter is refused so an UPDATE can never touch every row.
    fn push_where(&self, builder: &mut QueryBuilder<'a, Sqlite>) -> Result<(), RepositoryError> {
        if self.terms.is_empty() {
            return Err(RepositoryError::QueryBuild(
                "refusing to build a statement without a WHERE clause".to_string(),
            ));
        }
        for (column, _) in &self.terms {
            validate_identifier(column)?;
        }

        builder.push(" WHERE ");
        let mut terms = builder.separated(" AND ");
        for (column, value) in &self.terms {
            terms.push(*column);
            terms.push_unseparated(" = ");
            terms.push_bind_unseparated(*value);
        }

        Ok(())
    }
}

fn validate_identifier(name: &str) -> Result<(), RepositoryError> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(RepositoryError::QueryBuild(format!(
            "invalid column name '{name}'"
        )))
    }
}

/// `INSERT INTO reservation (...) VALUES (...) RETURNING id`
pub fn insert_reservation(reservation: &NewReservation) -> QueryBuilder<'_, Sqlite> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {RESERVATION_TABLE} ({RESERVATION_INSERT_COLUMNS}) "
    ));
    builder.push_values(std::iter::once(reservation), |mut row, r| {
        row.push_bind(r.reservation_uid.as_str())
            .push_bind(r.username.as_str())
            .push_bind(r.book_uid.as_str())
            .push_bind(r.library_uid.as_str())
            .push_bind(r.status.as_str())
            .push_bind(r.start_date)
            .push_bind(r.till_date);
    });
    builder.push(" RETURNING id");
    builder
}

/// `UPDATE reservation SET status = ? WHERE ...`
pub fn update_reservation_status<'a>(
    status: &'a str,
    filter: &EqFilter<'a>,
) -> Result<QueryBuilder<'a, Sqlite>, RepositoryError> {
    let mut builder = QueryBuilder::new(format!("UPDATE {RESERVATION_TABLE} SET status = "));
    builder.push_bind(status);
    filter.push_where(&mut builder)?;
    Ok(builder)
}

/// `SELECT <columns> FROM reservation WHERE ...`
pub fn select_reservations<'a>(
    filter: &EqFilter<'a>,
) -> Result<QueryBuilder<'a, Sqlite>, RepositoryError> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {RESERVATION_SELECT_COLUMNS} FROM {RESERVATION_TABLE}"
    ));
    filter.push_where(&mut builder)?;
    Ok(builder)
}
