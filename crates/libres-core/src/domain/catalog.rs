//! Catalog domain types.
//!
//! Libraries and the books they lend. These are plain records: stock
//! bookkeeping (lend/return arithmetic on `available_count`) is owned by the
//! calling service, not by the types or the repositories.

use serde::{Deserialize, Serialize};

/// A library branch.
///
/// `library_uid` is the caller-assigned external identity; `id` is the
/// store-assigned surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: i64,
    pub library_uid: String,
    pub name: String,
    pub address: String,
    pub city: String,
}

/// Data for registering a new library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLibrary {
    pub library_uid: String,
    pub name: String,
    pub address: String,
    pub city: String,
}

impl NewLibrary {
    /// Attach the store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: i64) -> Library {
        Library {
            id,
            library_uid: self.library_uid,
            name: self.name,
            address: self.address,
            city: self.city,
        }
    }
}

/// A book title held in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub book_uid: String,
    pub name: String,
    pub author: String,
    pub genre: String,
    /// Free-text descriptor, e.g. "EXCELLENT" or "BAD".
    pub condition: String,
    /// Remaining loanable copies.
    pub available_count: u32,
}

/// Data for registering a new book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub book_uid: String,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub condition: String,
    pub available_count: u32,
}

impl NewBook {
    /// Attach the store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: i64) -> Book {
        Book {
            id,
            book_uid: self.book_uid,
            name: self.name,
            author: self.author,
            genre: self.genre,
            condition: self.condition,
            available_count: self.available_count,
        }
    }
}
