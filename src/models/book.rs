//! Book record, its wire representation and query parameters

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Stored book record
#[derive(Debug, Clone, PartialEq, Eq, Default, FromRow)]
pub struct Book {
    /// Assigned by storage on first save
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            isbn: Some(isbn.into()),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Book as sent and received over HTTP
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookDto {
    /// Server-assigned identifier; ignored on input
    pub id: Option<i64>,
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title must not be empty")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Author is required"),
        length(min = 1, message = "Author must not be empty")
    )]
    pub author: Option<String>,
    pub isbn: Option<String>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: Some(book.title),
            author: Some(book.author),
            isbn: book.isbn,
        }
    }
}

impl From<BookDto> for Book {
    fn from(dto: BookDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title.unwrap_or_default(),
            author: dto.author.unwrap_or_default(),
            isbn: dto.isbn,
        }
    }
}

/// Book search parameters. Unset or empty fields match anything.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Exact id
    pub id: Option<i64>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the author
    pub author: Option<String>,
    /// Case-insensitive substring of the ISBN
    pub isbn: Option<String>,
    /// Zero-based page number (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20)
    pub size: Option<i64>,
}

impl BookQuery {
    /// The sparse template record the filter is built from
    pub fn template(&self) -> Book {
        Book {
            id: self.id,
            title: self.title.clone().unwrap_or_default(),
            author: self.author.clone().unwrap_or_default(),
            isbn: self.isbn.clone(),
        }
    }
}

/// Flatten validator output into one message per violated rule, ordered by field name
pub fn violation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dto() {
        let dto = BookDto {
            id: None,
            title: Some("My book".into()),
            author: Some("Author".into()),
            isbn: Some("123456".into()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_isbn_is_optional() {
        let dto = BookDto {
            title: Some("My book".into()),
            author: Some("Author".into()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_one_message_each() {
        let errors = BookDto::default().validate().unwrap_err();
        let messages = violation_messages(&errors);
        assert_eq!(messages, vec!["Author is required", "Title is required"]);
    }

    #[test]
    fn test_empty_title() {
        let dto = BookDto {
            title: Some(String::new()),
            author: Some("Author".into()),
            ..Default::default()
        };
        let messages = violation_messages(&dto.validate().unwrap_err());
        assert_eq!(messages, vec!["Title must not be empty"]);
    }

    #[test]
    fn test_dto_conversion() {
        let book = Book::new("My book", "Author", "123456").with_id(1);
        let dto = BookDto::from(book.clone());
        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.title.as_deref(), Some("My book"));
        assert_eq!(Book::from(dto), book);
    }

    #[test]
    fn test_query_template() {
        let query = BookQuery {
            author: Some("auth".into()),
            ..Default::default()
        };
        let template = query.template();
        assert_eq!(template.id, None);
        assert!(template.title.is_empty());
        assert_eq!(template.author, "auth");
        assert_eq!(template.isbn, None);
    }
}
