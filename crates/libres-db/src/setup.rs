//! Database setup and initialization.
//!
//! This module provides `setup_database()` for initializing an on-disk
//! `SQLite` database and `setup_pool()` for connecting through a
//! [`StoreConfig`]. Both ensure the full schema exists before returning.

use anyhow::Result;
use libres_core::StoreConfig;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Sets up the `SQLite` database file and ensures the schema exists.
///
/// This function:
/// 1. Creates the parent directory and database file if missing
/// 2. Opens a connection pool
/// 3. Creates the `library`, `book` and `reservation` tables and indexes
///
/// # Example
///
/// ```rust,no_run
/// use libres_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/var/lib/libres/libres.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true),
    )
    .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Connects to `config.database_url` with the configured pool size and
/// ensures the schema exists.
pub async fn setup_pool(config: &StoreConfig) -> Result<SqlitePool> {
    config.validate()?;

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all statements use IF NOT EXISTS.
/// The `library` and `book` tables keep the catalog store's camelCase
/// column names (`"libraryUid"`, `"bookUid"`, `"availableCount"`).
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS library (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            "libraryUid" TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_library_city ON library(city)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS book (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            "bookUid" TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            author TEXT NOT NULL,
            genre TEXT NOT NULL,
            condition TEXT NOT NULL DEFAULT 'EXCELLENT',
            "availableCount" INTEGER NOT NULL CHECK ("availableCount" >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Book and library UIDs are weak references: no foreign keys
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservation (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            reservation_uid TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL,
            book_uid TEXT NOT NULL,
            library_uid TEXT NOT NULL,
            status TEXT NOT NULL,
            start_date TEXT NOT NULL,
            till_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Serves the (username, status) list query
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_reservation_username_status ON reservation(username, status)",
    )
    .execute(pool)
    .await?;

    debug!("Schema ready");

    Ok(())
}
