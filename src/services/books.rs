//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    filter::BookFilter,
    models::{Book, Page, PageRequest},
    repository::Repository,
};

pub const ISBN_IN_USE: &str = "Isbn is already in use.";
const MISSING_ID: &str = "Book id can not be null";

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Store a new book. Rejects an ISBN that another book already uses.
    pub async fn save(&self, book: Book) -> AppResult<Book> {
        if let Some(isbn) = book.isbn.as_deref().filter(|isbn| !isbn.is_empty()) {
            if self.repository.books.exists_by_isbn(isbn).await? {
                tracing::warn!(isbn, "Rejected book with duplicate ISBN");
                return Err(AppError::BusinessRule(ISBN_IN_USE.to_string()));
            }
        }

        let saved = self.repository.books.save(&book).await?;
        tracing::info!(id = ?saved.id, "Book saved");
        Ok(saved)
    }

    /// Absence is a normal outcome, not an error
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        self.repository.books.find_by_id(id).await
    }

    pub async fn delete(&self, id: Option<i64>) -> AppResult<()> {
        let id = id.ok_or_else(|| AppError::InvalidArgument(MISSING_ID.to_string()))?;
        self.repository.books.delete_by_id(id).await?;
        tracing::info!(id, "Book deleted");
        Ok(())
    }

    /// Overwrite every field of the stored record with the same id
    pub async fn update(&self, book: Book) -> AppResult<Book> {
        if book.id.is_none() {
            return Err(AppError::InvalidArgument(MISSING_ID.to_string()));
        }
        self.repository.books.save(&book).await
    }

    /// Page of books matching the non-empty fields of `template`
    pub async fn find(&self, template: &Book, page: PageRequest) -> AppResult<Page<Book>> {
        let filter = BookFilter::from_template(template);
        self.repository.books.find_all(&filter, page).await
    }
}
