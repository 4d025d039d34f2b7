//! Data models for the book catalog

pub mod book;
pub mod page;

// Re-export commonly used types
pub use book::{Book, BookDto, BookQuery};
pub use page::{BookPage, Page, PageRequest};
