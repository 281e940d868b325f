//! Row mapping helpers for `SQLite` queries.
//!
//! Reservation rows are first scanned into a [`ReservationDraft`] (every
//! column nullable) and then promoted; a row with a missing column is
//! reported as malformed instead of leaking `Option`s into the domain.

use chrono::{DateTime, Utc};
use libres_core::{Book, Library, RepositoryError, Reservation, ReservationDraft};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Shared SELECT column list for library queries.
pub const LIBRARY_SELECT_COLUMNS: &str = r#"id, "libraryUid", name, address, city"#;

/// Shared SELECT column list for book queries.
pub const BOOK_SELECT_COLUMNS: &str =
    r#"id, "bookUid", name, author, genre, condition, "availableCount""#;

const MAP_RESERVATION: &str = "map reservation row";
const MAP_LIBRARY: &str = "map library row";
const MAP_BOOK: &str = "map book row";

fn column<'r, T>(
    row: &'r SqliteRow,
    name: &str,
    operation: &'static str,
) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::execution(operation, e))
}

/// Scan a reservation row without requiring any column to be non-NULL.
pub fn row_to_reservation_draft(row: &SqliteRow) -> Result<ReservationDraft, RepositoryError> {
    Ok(ReservationDraft {
        id: column::<Option<i64>>(row, "id", MAP_RESERVATION)?,
        reservation_uid: column(row, "reservation_uid", MAP_RESERVATION)?,
        username: column(row, "username", MAP_RESERVATION)?,
        book_uid: column(row, "book_uid", MAP_RESERVATION)?,
        library_uid: column(row, "library_uid", MAP_RESERVATION)?,
        status: column(row, "status", MAP_RESERVATION)?,
        start_date: column::<Option<DateTime<Utc>>>(row, "start_date", MAP_RESERVATION)?,
        till_date: column::<Option<DateTime<Utc>>>(row, "till_date", MAP_RESERVATION)?,
    })
}

/// Parse a database row into a Reservation.
pub fn row_to_reservation(row: &SqliteRow) -> Result<Reservation, RepositoryError> {
    let draft = row_to_reservation_draft(row)?;
    Reservation::try_from(draft).map_err(|e| RepositoryError::execution(MAP_RESERVATION, e))
}

/// Parse a database row into a Library.
pub fn row_to_library(row: &SqliteRow) -> Result<Library, RepositoryError> {
    Ok(Library {
        id: column(row, "id", MAP_LIBRARY)?,
        library_uid: column(row, "libraryUid", MAP_LIBRARY)?,
        name: column(row, "name", MAP_LIBRARY)?,
        address: column(row, "address", MAP_LIBRARY)?,
        city: column(row, "city", MAP_LIBRARY)?,
    })
}

/// Parse a database row into a Book.
pub fn row_to_book(row: &SqliteRow) -> Result<Book, RepositoryError> {
    let available_count: i64 = column(row, "availableCount", MAP_BOOK)?;

    Ok(Book {
        id: column(row, "id", MAP_BOOK)?,
        book_uid: column(row, "bookUid", MAP_BOOK)?,
        name: column(row, "name", MAP_BOOK)?,
        author: column(row, "author", MAP_BOOK)?,
        genre: column(row, "genre", MAP_BOOK)?,
        condition: column(row, "condition", MAP_BOOK)?,
        available_count: u32::try_from(available_count)
            .map_err(|e| RepositoryError::execution(MAP_BOOK, e))?,
    })
}
