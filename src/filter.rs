//! Predicate builder for book searches.
//!
//! A [`BookFilter`] is built from a sparse template record: unset or empty
//! fields are ignored, text fields become case-insensitive substring
//! criteria and a set id must match exactly. The same predicate can be
//! evaluated against an in-memory [`Book`] or rendered into a SQL `WHERE`
//! clause. Both backends agree on ASCII text. Outside ASCII the in-memory
//! side folds case with Unicode rules while Postgres `LOWER` follows the
//! database collation, so letters such as `İ` may fold differently.

use sqlx::{Postgres, QueryBuilder};

use crate::models::{Book, BookQuery};

/// Text columns a filter can match on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Isbn,
}

impl BookField {
    pub fn column(self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Isbn => "isbn",
        }
    }

    /// Stored value of this field, `None` when the column is NULL
    pub fn value(self, book: &Book) -> Option<&str> {
        match self {
            BookField::Title => Some(book.title.as_str()),
            BookField::Author => Some(book.author.as_str()),
            BookField::Isbn => book.isbn.as_deref(),
        }
    }
}

/// A single active condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    IdEquals(i64),
    /// `needle` is stored lowercased
    Contains { field: BookField, needle: String },
}

impl Criterion {
    fn contains(field: BookField, value: Option<&str>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(|v| Criterion::Contains {
            field,
            needle: v.to_lowercase(),
        })
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Criterion::IdEquals(id) => book.id == Some(*id),
            Criterion::Contains { field, needle } => field
                .value(book)
                .map_or(false, |v| v.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// Conjunction of criteria. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    criteria: Vec<Criterion>,
}

impl BookFilter {
    pub fn from_template(template: &Book) -> Self {
        let criteria = template
            .id
            .map(Criterion::IdEquals)
            .into_iter()
            .chain(Criterion::contains(BookField::Title, Some(template.title.as_str())))
            .chain(Criterion::contains(BookField::Author, Some(template.author.as_str())))
            .chain(Criterion::contains(BookField::Isbn, template.isbn.as_deref()))
            .collect();
        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.criteria.iter().all(|c| c.matches(book))
    }

    /// Append ` WHERE ...` to `builder`; nothing is appended for an empty filter
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let mut separator = " WHERE ";
        for criterion in &self.criteria {
            builder.push(separator);
            separator = " AND ";
            match criterion {
                Criterion::IdEquals(id) => {
                    builder.push("id = ").push_bind(*id);
                }
                Criterion::Contains { field, needle } => {
                    builder
                        .push("LOWER(")
                        .push(field.column())
                        .push(") LIKE ")
                        .push_bind(like_pattern(needle))
                        .push(" ESCAPE '\\'");
                }
            }
        }
    }
}

impl From<&BookQuery> for BookFilter {
    fn from(query: &BookQuery) -> Self {
        Self::from_template(&query.template())
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
