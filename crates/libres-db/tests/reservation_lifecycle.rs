//! Reservation lifecycle integration tests.
//!
//! Drives the repositories through the `Repos` trait objects, the way a
//! calling service would.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use libres_core::{
    NewReservation, Repos, RepositoryError, ReservationDraft, ReservationFilter, StoreConfig,
};
use libres_db::RepoFactory;

async fn repos() -> Repos {
    let config = StoreConfig {
        database_url: "sqlite::memory:".to_string(),
        ..StoreConfig::with_defaults()
    }
    .with_query_timeout(Duration::from_secs(2));

    let pool = RepoFactory::create_pool(&config)
        .await
        .expect("Failed to setup test db");
    RepoFactory::build_repos(pool, &config)
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn alice_rents_b1() -> NewReservation {
    ReservationDraft {
        reservation_uid: Some("r1".to_string()),
        username: Some("alice".to_string()),
        book_uid: Some("b1".to_string()),
        library_uid: Some("l1".to_string()),
        status: Some("RENTED".to_string()),
        start_date: Some(date(2024, 1, 1)),
        till_date: Some(date(2024, 1, 15)),
        ..ReservationDraft::default()
    }
    .try_into()
    .expect("draft is complete")
}

/// Create, read back, return the book, read again.
#[tokio::test]
async fn test_rent_and_return_scenario() {
    let repos = repos().await;
    let new = alice_rents_b1();

    let id = repos
        .reservations
        .create_reservation(&new)
        .await
        .expect("Failed to create reservation");
    assert_eq!(id, 1);

    let stored = repos.reservations.get_reservation("r1").await.unwrap();
    assert_eq!(stored, new.clone().with_id(1));

    repos
        .reservations
        .update_reservation_status("r1", "alice", "RETURNED")
        .await
        .unwrap();

    let returned = repos.reservations.get_reservation("r1").await.unwrap();
    assert_eq!(returned.status, "RETURNED");
    assert_eq!(returned.start_date, date(2024, 1, 1));
    assert_eq!(returned.till_date, date(2024, 1, 15));
    assert_eq!(returned.book_uid, "b1");
}

#[tokio::test]
async fn test_unknown_uid_is_not_found() {
    let repos = repos().await;
    let err = repos
        .reservations
        .get_reservation("nonexistent")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn test_other_users_reservation_is_not_updated() {
    let repos = repos().await;
    repos
        .reservations
        .create_reservation(&alice_rents_b1())
        .await
        .unwrap();

    let err = repos
        .reservations
        .update_reservation_status("r1", "bob", "RETURNED")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NoRowsAffected(_)));
}

#[tokio::test]
async fn test_list_reflects_status_changes() {
    let repos = repos().await;
    repos
        .reservations
        .create_reservation(&alice_rents_b1())
        .await
        .unwrap();

    let rented = ReservationFilter::new("alice", "RENTED");
    let returned = ReservationFilter::new("alice", "RETURNED");

    assert_eq!(
        repos.reservations.get_reservations(&rented).await.unwrap().len(),
        1
    );
    assert!(
        repos
            .reservations
            .get_reservations(&returned)
            .await
            .unwrap()
            .is_empty()
    );

    repos
        .reservations
        .update_reservation_status("r1", "alice", "RETURNED")
        .await
        .unwrap();

    assert!(
        repos
            .reservations
            .get_reservations(&rented)
            .await
            .unwrap()
            .is_empty()
    );
    let listed = repos.reservations.get_reservations(&returned).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].reservation_uid, "r1");
}

#[tokio::test]
async fn test_concurrent_readers_share_repository() {
    let repos = repos().await;
    repos
        .reservations
        .create_reservation(&alice_rents_b1())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let reservations = repos.reservations.clone();
        handles.push(tokio::spawn(async move {
            reservations.get_reservation("r1").await
        }));
    }

    for handle in handles {
        let reservation = handle.await.unwrap().unwrap();
        assert_eq!(reservation.username, "alice");
    }
}
