//! Per-statement deadline against a backend that cannot make progress.
//!
//! A second pool holds `BEGIN IMMEDIATE` on the same on-disk database, so
//! every write from the repositories waits on the lock until their short
//! deadline fires.

use std::error::Error;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use libres_core::{
    CatalogRepository, NewLibrary, NewReservation, RepositoryError, ReservationRepository,
};
use libres_db::{
    DeadlineExceeded, SqliteCatalogRepository, SqliteReservationRepository, setup_database,
};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Sqlite, SqlitePool};

const SHORT_DEADLINE: Duration = Duration::from_millis(150);

async fn hold_write_lock(db_path: &Path) -> (SqlitePool, PoolConnection<Sqlite>) {
    let pool = SqlitePool::connect_with(SqliteConnectOptions::new().filename(db_path))
        .await
        .expect("Failed to open second pool");
    let mut conn = pool.acquire().await.unwrap();
    sqlx::query("BEGIN IMMEDIATE")
        .execute(&mut *conn)
        .await
        .unwrap();
    (pool, conn)
}

async fn release_write_lock(mut conn: PoolConnection<Sqlite>) {
    sqlx::query("ROLLBACK").execute(&mut *conn).await.unwrap();
}

fn assert_deadline_exceeded(err: &RepositoryError, expected_operation: &str) {
    match err {
        RepositoryError::Execution { operation, .. } => assert_eq!(*operation, expected_operation),
        other => panic!("expected Execution, got {other:?}"),
    }
    let deadline = err
        .source()
        .and_then(|source| source.downcast_ref::<DeadlineExceeded>())
        .expect("source should be DeadlineExceeded");
    assert_eq!(deadline.timeout, SHORT_DEADLINE);
}

#[tokio::test]
async fn test_status_update_times_out_while_store_is_locked() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("libres.db");
    let pool = setup_database(&db_path).await.unwrap();

    let repo = SqliteReservationRepository::with_timeout(pool, SHORT_DEADLINE);
    repo.create_reservation(&NewReservation {
        reservation_uid: "r1".to_string(),
        username: "alice".to_string(),
        book_uid: "b1".to_string(),
        library_uid: "l1".to_string(),
        status: "RENTED".to_string(),
        start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        till_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
    })
    .await
    .unwrap();

    let (_locker, conn) = hold_write_lock(&db_path).await;

    let started = Instant::now();
    let err = repo
        .update_reservation_status("r1", "alice", "RETURNED")
        .await
        .unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_deadline_exceeded(&err, "update reservation status");

    release_write_lock(conn).await;
}

#[tokio::test]
async fn test_catalog_insert_times_out_while_store_is_locked() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("libres.db");
    let pool = setup_database(&db_path).await.unwrap();

    let repo = SqliteCatalogRepository::with_timeout(pool, SHORT_DEADLINE);
    let (_locker, conn) = hold_write_lock(&db_path).await;

    let err = repo
        .create_library(&NewLibrary {
            library_uid: "l1".to_string(),
            name: "Central".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
        })
        .await
        .unwrap_err();
    assert_deadline_exceeded(&err, "create library");

    release_write_lock(conn).await;
}
