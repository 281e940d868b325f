//! Port definitions (trait abstractions) for the relational store.
//!
//! Ports define the interfaces that callers expect from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits are minimal and CRUD-focused
//! - Every operation is a single statement; no transactions span calls

pub mod catalog_repository;
pub mod reservation_repository;

use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

// Re-export repository traits for convenience
pub use catalog_repository::CatalogRepository;
pub use reservation_repository::ReservationRepository;

/// Container for all repository trait objects.
///
/// Lets callers wire repositories without coupling to concrete
/// implementations. It lives in `libres-core` so consumers can accept it
/// without depending on `libres-db`.
///
/// # Example
///
/// ```ignore
/// let pool = RepoFactory::create_pool(&config).await?;
/// let repos = RepoFactory::build_repos(pool, &config);
/// let id = repos.reservations.create_reservation(&new).await?;
/// ```
#[derive(Clone)]
pub struct Repos {
    /// Reservation repository.
    pub reservations: Arc<dyn ReservationRepository>,
    /// Library and book catalog repository.
    pub catalog: Arc<dyn CatalogRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self {
            reservations,
            catalog,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// Storage implementation details (e.g. sqlx errors) only travel as the
/// boxed `source` of [`RepositoryError::Execution`]. "Not found", "nothing
/// updated" and "backend failed" are always distinguishable.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Statement construction failed. Indicates a programming error.
    #[error("Failed to build query: {0}")]
    QueryBuild(String),

    /// The backend call failed: connectivity, constraint violation, deadline
    /// expiry or a row that could not be mapped.
    #[error("Failed to execute {operation}: {source}")]
    Execution {
        operation: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A lookup matched zero rows.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A mutation matched zero rows.
    #[error("No rows affected: {0}")]
    NoRowsAffected(String),
}

impl RepositoryError {
    /// Wrap a backend failure with the name of the operation that hit it.
    pub fn execution(
        operation: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Execution {
            operation,
            source: source.into(),
        }
    }

    /// Whether the error reports an absent entity rather than a failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DraftError;

    #[test]
    fn test_execution_error_keeps_source_and_operation() {
        let err = RepositoryError::execution(
            "map reservation row",
            DraftError::MissingField("status"),
        );

        assert_eq!(
            err.to_string(),
            "Failed to execute map reservation row: Reservation field 'status' is required"
        );
        let source = err.source().expect("execution errors carry a source");
        assert!(source.downcast_ref::<DraftError>().is_some());
    }

    #[test]
    fn test_execution_error_from_message() {
        let err = RepositoryError::execution("get reservation", "connection reset");
        assert!(matches!(
            err,
            RepositoryError::Execution {
                operation: "get reservation",
                ..
            }
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_is_distinguishable() {
        assert!(RepositoryError::NotFound("Reservation 'x'".to_string()).is_not_found());
        assert!(!RepositoryError::NoRowsAffected("Reservation 'x'".to_string()).is_not_found());
    }
}
