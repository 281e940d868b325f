//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, connection pools, etc.).
//!
//! # Structure
//!
//! - `catalog` - Library and book records (`Library`, `Book`, `NewLibrary`, `NewBook`)
//! - `reservation` - Reservation records and the partial `ReservationDraft`

pub mod catalog;
pub mod reservation;

// Re-export catalog types at the domain level for convenience
pub use catalog::{Book, Library, NewBook, NewLibrary};

// Re-export reservation types at the domain level for convenience
pub use reservation::{
    DraftError, NewReservation, Reservation, ReservationDraft, ReservationFilter,
};
