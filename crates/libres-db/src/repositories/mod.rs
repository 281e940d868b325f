//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL statements and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod deadline;
mod row_mappers;
mod sqlite_catalog_repository;
mod sqlite_reservation_repository;
mod statements;

pub use deadline::DeadlineExceeded;
pub use sqlite_catalog_repository::SqliteCatalogRepository;
pub use sqlite_reservation_repository::SqliteReservationRepository;
