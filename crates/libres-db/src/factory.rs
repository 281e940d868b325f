//! Composition utilities for building repositories with `SQLite` backends.
//!
//! This module is focused purely on construction and should not contain
//! any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use libres_core::{Repos, StoreConfig};

use crate::repositories::{SqliteCatalogRepository, SqliteReservationRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct RepoFactory;

impl RepoFactory {
    /// Create a `SQLite` connection pool from `config` with the schema in place.
    pub async fn create_pool(config: &StoreConfig) -> anyhow::Result<SqlitePool> {
        crate::setup::setup_pool(config).await
    }

    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for callers to obtain repositories.
    /// Every repository shares the pool and the configured deadline.
    pub fn build_repos(pool: SqlitePool, config: &StoreConfig) -> Repos {
        Repos::new(
            Self::reservation_repository(pool.clone(), config),
            Self::catalog_repository(pool, config),
        )
    }

    /// Create a reservation repository from a pool.
    pub fn reservation_repository(
        pool: SqlitePool,
        config: &StoreConfig,
    ) -> Arc<SqliteReservationRepository> {
        Arc::new(SqliteReservationRepository::new(pool, config))
    }

    /// Create a catalog repository from a pool.
    pub fn catalog_repository(
        pool: SqlitePool,
        config: &StoreConfig,
    ) -> Arc<SqliteCatalogRepository> {
        Arc::new(SqliteCatalogRepository::new(pool, config))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
    config: StoreConfig,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self {
            pool,
            config: StoreConfig::with_defaults(),
        })
    }

    /// Get the underlying pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build the `Repos` container over this test database.
    pub fn repos(&self) -> Repos {
        RepoFactory::build_repos(self.pool.clone(), &self.config)
    }

    /// Create a reservation repository using this test database.
    pub fn reservation_repository(&self) -> SqliteReservationRepository {
        SqliteReservationRepository::new(self.pool.clone(), &self.config)
    }

    /// Create a catalog repository using this test database.
    pub fn catalog_repository(&self) -> SqliteCatalogRepository {
        SqliteCatalogRepository::new(self.pool.clone(), &self.config)
    }
}
