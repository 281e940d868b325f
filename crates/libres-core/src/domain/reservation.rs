//! Reservation domain types.
//!
//! A reservation links a user, a book and a library for a bounded date range
//! under a status label. Book and library are weak references by UID.
//!
//! Three shapes cover the record's lifecycle:
//!
//! - [`ReservationDraft`]: every field optional. Used for partial
//!   construction and as the as-scanned form of a database row.
//! - [`NewReservation`]: fully populated, not yet persisted (no id).
//! - [`Reservation`]: fully populated and persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub reservation_uid: String,
    pub username: String,
    pub book_uid: String,
    pub library_uid: String,
    /// State label such as `RENTED`, `RETURNED` or `EXPIRED`. The vocabulary
    /// belongs to the calling service.
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
}

/// Data for creating a new reservation. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub reservation_uid: String,
    pub username: String,
    pub book_uid: String,
    pub library_uid: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
}

impl NewReservation {
    /// Attach the store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: i64) -> Reservation {
        Reservation {
            id,
            reservation_uid: self.reservation_uid,
            username: self.username,
            book_uid: self.book_uid,
            library_uid: self.library_uid,
            status: self.status,
            start_date: self.start_date,
            till_date: self.till_date,
        }
    }
}

/// A reservation with every field optional.
///
/// `None` means "not set", which is distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationDraft {
    pub id: Option<i64>,
    pub reservation_uid: Option<String>,
    pub username: Option<String>,
    pub book_uid: Option<String>,
    pub library_uid: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub till_date: Option<DateTime<Utc>>,
}

/// Errors raised when a draft cannot be promoted to a populated record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Reservation field '{0}' is required")]
    MissingField(&'static str),

    #[error("Reservation id {0} is assigned by the store and must be absent")]
    IdAlreadyAssigned(i64),
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, DraftError> {
    value.ok_or(DraftError::MissingField(field))
}

impl TryFrom<ReservationDraft> for NewReservation {
    type Error = DraftError;

    fn try_from(draft: ReservationDraft) -> Result<Self, Self::Error> {
        if let Some(id) = draft.id {
            return Err(DraftError::IdAlreadyAssigned(id));
        }

        Ok(Self {
            reservation_uid: require(draft.reservation_uid, "reservation_uid")?,
            username: require(draft.username, "username")?,
            book_uid: require(draft.book_uid, "book_uid")?,
            library_uid: require(draft.library_uid, "library_uid")?,
            status: require(draft.status, "status")?,
            start_date: require(draft.start_date, "start_date")?,
            till_date: require(draft.till_date, "till_date")?,
        })
    }
}

impl TryFrom<ReservationDraft> for Reservation {
    type Error = DraftError;

    fn try_from(mut draft: ReservationDraft) -> Result<Self, Self::Error> {
        let id = require(draft.id.take(), "id")?;
        NewReservation::try_from(draft).map(|new| new.with_id(id))
    }
}

impl From<Reservation> for ReservationDraft {
    fn from(r: Reservation) -> Self {
        Self {
            id: Some(r.id),
            reservation_uid: Some(r.reservation_uid),
            username: Some(r.username),
            book_uid: Some(r.book_uid),
            library_uid: Some(r.library_uid),
            status: Some(r.status),
            start_date: Some(r.start_date),
            till_date: Some(r.till_date),
        }
    }
}

/// Exact-match filter for listing a user's reservations in a given state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationFilter {
    pub username: String,
    pub status: String,
}

impl ReservationFilter {
    pub fn new(username: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            status: status.into(),
        }
    }
}
