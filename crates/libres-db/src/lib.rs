#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::RepoFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{DeadlineExceeded, SqliteCatalogRepository, SqliteReservationRepository};

// Re-export setup functions for convenient access
pub use setup::{setup_database, setup_pool};
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

// libsqlite3-sys is linked only for its bundled SQLite build
use libsqlite3_sys as _;
