//! Reservation repository trait definition.
//!
//! This port defines the interface for reservation persistence.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewReservation, Reservation, ReservationFilter};

/// Repository for reservation persistence operations.
///
/// Every call issues exactly one statement under the implementation's
/// configured deadline. Nothing is retried. Reservations are never deleted
/// through this port; the only mutation after creation is the status.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a reservation and return the store-assigned id.
    ///
    /// A duplicate `reservation_uid` surfaces as `RepositoryError::Execution`.
    async fn create_reservation(&self, reservation: &NewReservation)
    -> Result<i64, RepositoryError>;

    /// Replace the status of the reservation identified by `uid` and owned
    /// by `username`.
    ///
    /// Returns `Err(RepositoryError::NoRowsAffected)` if no reservation
    /// matches both. Re-applying the current status succeeds.
    async fn update_reservation_status(
        &self,
        uid: &str,
        username: &str,
        status: &str,
    ) -> Result<(), RepositoryError>;

    /// Get a reservation by its UID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no reservation has that UID.
    async fn get_reservation(&self, uid: &str) -> Result<Reservation, RepositoryError>;

    /// List reservations matching both the username and the status.
    ///
    /// No matches yields an empty vector. Order is backend-dependent.
    async fn get_reservations(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, RepositoryError>;
}
