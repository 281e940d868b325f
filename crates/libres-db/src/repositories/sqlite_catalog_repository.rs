//! `SQLite` implementation of the `CatalogRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::debug;

use libres_core::{
    Book, CatalogRepository, Library, NewBook, NewLibrary, RepositoryError, StoreConfig,
};

use super::deadline::run_with_deadline;
use super::row_mappers::{
    BOOK_SELECT_COLUMNS, LIBRARY_SELECT_COLUMNS, row_to_book, row_to_library,
};

/// `SQLite` implementation of the `CatalogRepository` trait.
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteCatalogRepository {
    /// Create a catalog repository using the deadline from `config`.
    pub fn new(pool: SqlitePool, config: &StoreConfig) -> Self {
        Self::with_timeout(pool, config.query_timeout())
    }

    /// Create a catalog repository with an explicit per-statement deadline.
    pub const fn with_timeout(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn create_library(&self, library: &NewLibrary) -> Result<i64, RepositoryError> {
        let id = run_with_deadline(
            "create library",
            self.timeout,
            sqlx::query_scalar::<_, i64>(
                r#"INSERT INTO library ("libraryUid", name, address, city)
                VALUES (?, ?, ?, ?) RETURNING id"#,
            )
            .bind(&library.library_uid)
            .bind(&library.name)
            .bind(&library.address)
            .bind(&library.city)
            .fetch_one(&self.pool),
        )
        .await?;

        debug!(id, uid = %library.library_uid, "library created");
        Ok(id)
    }

    async fn get_library(&self, uid: &str) -> Result<Library, RepositoryError> {
        let query =
            format!(r#"SELECT {LIBRARY_SELECT_COLUMNS} FROM library WHERE "libraryUid" = ?"#);

        let row = run_with_deadline(
            "get library",
            self.timeout,
            sqlx::query(&query).bind(uid).fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Library '{uid}'")))?;

        row_to_library(&row)
    }

    async fn list_libraries_in_city(&self, city: &str) -> Result<Vec<Library>, RepositoryError> {
        let query =
            format!("SELECT {LIBRARY_SELECT_COLUMNS} FROM library WHERE city = ? ORDER BY id");

        let rows = run_with_deadline(
            "list libraries",
            self.timeout,
            sqlx::query(&query).bind(city).fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(row_to_library).collect()
    }

    async fn create_book(&self, book: &NewBook) -> Result<i64, RepositoryError> {
        let id = run_with_deadline(
            "create book",
            self.timeout,
            sqlx::query_scalar::<_, i64>(
                r#"INSERT INTO book ("bookUid", name, author, genre, condition, "availableCount")
                VALUES (?, ?, ?, ?, ?, ?) RETURNING id"#,
            )
            .bind(&book.book_uid)
            .bind(&book.name)
            .bind(&book.author)
            .bind(&book.genre)
            .bind(&book.condition)
            .bind(i64::from(book.available_count))
            .fetch_one(&self.pool),
        )
        .await?;

        debug!(id, uid = %book.book_uid, "book created");
        Ok(id)
    }

    async fn get_book(&self, uid: &str) -> Result<Book, RepositoryError> {
        let query = format!(r#"SELECT {BOOK_SELECT_COLUMNS} FROM book WHERE "bookUid" = ?"#);

        let row = run_with_deadline(
            "get book",
            self.timeout,
            sqlx::query(&query).bind(uid).fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Book '{uid}'")))?;

        row_to_book(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::TestDb;

    async fn repository() -> SqliteCatalogRepository {
        TestDb::new().await.unwrap().catalog_repository()
    }

    fn library(uid: &str, city: &str) -> NewLibrary {
        NewLibrary {
            library_uid: uid.to_string(),
            name: format!("Library {uid}"),
            address: "2-я Бауманская ул., д.5, стр.1".to_string(),
            city: city.to_string(),
        }
    }

    fn book(uid: &str, available_count: u32) -> NewBook {
        NewBook {
            book_uid: uid.to_string(),
            name: "Краткий курс C++ в 7 томах".to_string(),
            author: "Бьерн Страуструп".to_string(),
            genre: "Научная фантастика".to_string(),
            condition: "EXCELLENT".to_string(),
            available_count,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_library() {
        let repo = repository().await;
        let new = library("l1", "Москва");

        let id = repo.create_library(&new).await.unwrap();
        let stored = repo.get_library("l1").await.unwrap();
        assert_eq!(stored, new.with_id(id));
    }

    #[tokio::test]
    async fn test_get_missing_library_is_not_found() {
        let repo = repository().await;
        let err = repo.get_library("nope").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_library_uid_is_execution_error() {
        let repo = repository().await;
        repo.create_library(&library("l1", "Москва")).await.unwrap();

        let err = repo
            .create_library(&library("l1", "Казань"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Execution { .. }));
    }

    #[tokio::test]
    async fn test_list_libraries_in_city() {
        let repo = repository().await;
        repo.create_library(&library("l1", "Москва")).await.unwrap();
        repo.create_library(&library("l2", "Казань")).await.unwrap();
        repo.create_library(&library("l3", "Москва")).await.unwrap();

        let moscow = repo.list_libraries_in_city("Москва").await.unwrap();
        let uids: Vec<_> = moscow.iter().map(|l| l.library_uid.as_str()).collect();
        assert_eq!(uids, ["l1", "l3"]);

        assert!(repo.list_libraries_in_city("Omsk").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_get_book() {
        let repo = repository().await;
        let new = book("b1", 3);

        let id = repo.create_book(&new).await.unwrap();
        let stored = repo.get_book("b1").await.unwrap();
        assert_eq!(stored, new.with_id(id));
        assert_eq!(stored.available_count, 3);
    }

    #[tokio::test]
    async fn test_get_missing_book_is_not_found() {
        let repo = repository().await;
        assert!(repo.get_book("nope").await.unwrap_err().is_not_found());
    }
}
