#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS, DEFAULT_QUERY_TIMEOUT, StoreConfig,
};
pub use domain::{
    Book, DraftError, Library, NewBook, NewLibrary, NewReservation, Reservation, ReservationDraft,
    ReservationFilter,
};
pub use ports::{CatalogRepository, Repos, RepositoryError, ReservationRepository};
