//! Catalog repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Book, Library, NewBook, NewLibrary};

/// Repository for libraries and books.
///
/// Stock changes (lending and returning copies) are not part of this port;
/// the calling service owns that arithmetic.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Register a library and return its store-assigned id.
    async fn create_library(&self, library: &NewLibrary) -> Result<i64, RepositoryError>;

    /// Get a library by its UID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no library has that UID.
    async fn get_library(&self, uid: &str) -> Result<Library, RepositoryError>;

    /// List the libraries located in `city`. No matches yields an empty vector.
    async fn list_libraries_in_city(&self, city: &str) -> Result<Vec<Library>, RepositoryError>;

    /// Register a book and return its store-assigned id.
    async fn create_book(&self, book: &NewBook) -> Result<i64, RepositoryError>;

    /// Get a book by its UID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no book has that UID.
    async fn get_book(&self, uid: &str) -> Result<Book, RepositoryError>;
}
