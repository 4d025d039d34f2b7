//! Process-local book storage, used by the `memory` backend and by tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    filter::BookFilter,
    models::{Book, Page, PageRequest},
};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Book>,
}

/// Books keyed by id; iteration order is id order, like the SQL table
#[derive(Default)]
pub struct InMemoryBookRepository {
    table: RwLock<Table>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .any(|b| b.isbn.as_deref() == Some(isbn)))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, book: &Book) -> AppResult<Book> {
        let mut table = self.table.write().await;
        let id = match book.id {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(id) => return Err(AppError::NotFound(format!("Book {} not found", id))),
            None => {
                table.last_id += 1;
                table.last_id
            }
        };

        let stored = Book {
            id: Some(id),
            ..book.clone()
        };
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn find_all(&self, filter: &BookFilter, page: PageRequest) -> AppResult<Page<Book>> {
        let table = self.table.read().await;
        let matching: Vec<&Book> = table.rows.values().filter(|b| filter.matches(b)).collect();
        let total = matching.len() as i64;

        let content = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size).unwrap_or(0))
            .cloned()
            .collect();

        Ok(Page::new(content, page, total))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> InMemoryBookRepository {
        let repo = InMemoryBookRepository::new();
        repo.save(&Book::new("My book", "Author", "123456")).await.unwrap();
        repo.save(&Book::new("Other book", "Someone", "654321")).await.unwrap();
        repo.save(&Book::new("Third", "AUTHORITY", "111")).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryBookRepository::new();
        let first = repo.save(&Book::new("a", "b", "1")).await.unwrap();
        let second = repo.save(&Book::new("c", "d", "2")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let repo = seeded().await;
        let updated = repo
            .save(&Book::new("New title", "New author", "123456").with_id(1))
            .await
            .unwrap();
        assert_eq!(updated.id, Some(1));
        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.title, "New title");
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_fails() {
        let repo = InMemoryBookRepository::new();
        let result = repo.save(&Book::new("a", "b", "1").with_id(42)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_exists_by_isbn() {
        let repo = seeded().await;
        assert!(repo.exists_by_isbn("123456").await.unwrap());
        assert!(!repo.exists_by_isbn("123").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = seeded().await;
        repo.delete_by_id(1).await.unwrap();
        repo.delete_by_id(1).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_filters_and_pages() {
        let repo = seeded().await;
        let filter = BookFilter::from_template(&Book {
            author: "auth".into(),
            ..Default::default()
        });

        let page = repo.find_all(&filter, PageRequest::of(Some(0), Some(1))).await.unwrap();
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, Some(1));

        let page = repo.find_all(&filter, PageRequest::of(Some(1), Some(1))).await.unwrap();
        assert_eq!(page.content[0].id, Some(3));

        let page = repo.find_all(&filter, PageRequest::of(Some(5), Some(1))).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 2);
    }
}
