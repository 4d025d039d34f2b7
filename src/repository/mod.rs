//! Repository layer for book storage

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    filter::BookFilter,
    models::{Book, Page, PageRequest},
};

pub use books::PgBookRepository;
pub use memory::InMemoryBookRepository;

/// Generic storage operations over book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Whether any stored book carries exactly this ISBN
    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Insert when `book.id` is `None`, otherwise overwrite the row with that id.
    /// Returns the stored record.
    async fn save(&self, book: &Book) -> AppResult<Book>;

    /// Deleting a missing id is a no-op
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Matching books in id order, sliced by `page`, with the total match count
    async fn find_all(&self, filter: &BookFilter, page: PageRequest) -> AppResult<Page<Book>>;

    /// Round trip to the backing store
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the storage collaborators
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
}

impl Repository {
    /// Create a Postgres-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookRepository::new(pool)),
        }
    }

    /// Create a repository kept in process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(InMemoryBookRepository::new()),
        }
    }

    pub fn with_books(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}
