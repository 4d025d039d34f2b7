//! Offset/limit paging

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::BookDto;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 2000;

/// Requested slice of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Build a request from raw query values. A negative page becomes 0,
    /// a missing or non-positive size falls back to the default and
    /// oversized requests are capped.
    pub fn of(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.unwrap_or(0).max(0);
        let size = match size {
            Some(s) if s > 0 => s.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };
        Self { page, size }
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(None, None)
    }
}

/// One page of results plus total-count metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[aliases(BookPage = Page<BookDto>)]
pub struct Page<T> {
    /// Records on this page
    pub content: Vec<T>,
    /// Zero-based page number, as requested
    pub page: i64,
    /// Page size, as requested
    pub size: i64,
    /// Number of records matching the filter across all pages
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = if request.size > 0 {
            (total_elements + request.size - 1) / request.size
        } else {
            0
        };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
