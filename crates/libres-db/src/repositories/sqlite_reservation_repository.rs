//! `SQLite` implementation of the `ReservationRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::debug;

use libres_core::{
    NewReservation, RepositoryError, Reservation, ReservationFilter, ReservationRepository,
    StoreConfig,
};

use super::deadline::run_with_deadline;
use super::row_mappers::row_to_reservation;
use super::statements::{
    EqFilter, insert_reservation, select_reservations, update_reservation_status,
};

/// `SQLite` implementation of the `ReservationRepository` trait.
///
/// Holds no per-call state, so one instance can serve concurrent callers.
/// Each operation is a single statement bounded by `timeout`.
pub struct SqliteReservationRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteReservationRepository {
    /// Create a repository using the deadline from `config`.
    pub fn new(pool: SqlitePool, config: &StoreConfig) -> Self {
        Self::with_timeout(pool, config.query_timeout())
    }

    /// Create a repository with an explicit per-statement deadline.
    pub const fn with_timeout(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Get a reference to the underlying pool (for testing only).
    #[cfg(test)]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepository {
    async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<i64, RepositoryError> {
        let mut builder = insert_reservation(reservation);
        debug!(sql = builder.sql(), "create reservation");

        let id = run_with_deadline(
            "create reservation",
            self.timeout,
            builder.build_query_scalar::<i64>().fetch_one(&self.pool),
        )
        .await?;

        debug!(id, uid = %reservation.reservation_uid, "reservation created");
        Ok(id)
    }

    async fn update_reservation_status(
        &self,
        uid: &str,
        username: &str,
        status: &str,
    ) -> Result<(), RepositoryError> {
        let filter = EqFilter::new()
            .eq("reservation_uid", uid)
            .eq("username", username);
        let mut builder = update_reservation_status(status, &filter)?;
        debug!(sql = builder.sql(), "update reservation status");

        let result = run_with_deadline(
            "update reservation status",
            self.timeout,
            builder.build().execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NoRowsAffected(format!(
                "Reservation '{uid}' owned by '{username}'"
            )));
        }

        Ok(())
    }

    async fn get_reservation(&self, uid: &str) -> Result<Reservation, RepositoryError> {
        let filter = EqFilter::new().eq("reservation_uid", uid);
        let mut builder = select_reservations(&filter)?;
        debug!(sql = builder.sql(), "get reservation");

        let row = run_with_deadline(
            "get reservation",
            self.timeout,
            builder.build().fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Reservation '{uid}'")))?;

        row_to_reservation(&row)
    }

    async fn get_reservations(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        let eq = EqFilter::new()
            .eq("username", &filter.username)
            .eq("status", &filter.status);
        let mut builder = select_reservations(&eq)?;
        debug!(sql = builder.sql(), "get reservations");

        let rows = run_with_deadline(
            "get reservations",
            self.timeout,
            builder.build().fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(row_to_reservation).collect()
    }
}
