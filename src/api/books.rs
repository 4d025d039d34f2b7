//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDto, BookPage, BookQuery, PageRequest},
    AppState,
};

use super::{ApiPath, ApiQuery, ValidatedJson};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid input or ISBN already in use", body = crate::error::ApiErrors)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BookDto>,
) -> AppResult<(StatusCode, Json<BookDto>)> {
    let book = Book {
        id: None,
        ..Book::from(dto)
    };

    let saved = state.services.books.save(book).await?;
    Ok((StatusCode::CREATED, Json(BookDto::from(saved))))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found", body = crate::error::ApiErrors)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<BookDto>> {
    let book = state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(BookDto::from(book)))
}

/// Update the title and author of an existing book.
///
/// The id comes from the path and the stored ISBN is kept.
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Invalid input", body = crate::error::ApiErrors),
        (status = 404, description = "Book not found", body = crate::error::ApiErrors)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(dto): ValidatedJson<BookDto>,
) -> AppResult<Json<BookDto>> {
    let stored = state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let changes = Book::from(dto);
    let book = Book {
        id: Some(id),
        title: changes.title,
        author: changes.author,
        isbn: stored.isbn,
    };

    let updated = state.services.books.update(book).await?;
    Ok(Json(BookDto::from(updated)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ApiErrors)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    state.services.books.delete(Some(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search books with filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Page of matching books", body = BookPage),
        (status = 400, description = "Malformed query string", body = crate::error::ApiErrors)
    )
)]
pub async fn find_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BookQuery>,
) -> AppResult<Json<BookPage>> {
    let page = PageRequest::of(query.page, query.size);
    let result = state.services.books.find(&query.template(), page).await?;
    Ok(Json(result.map(BookDto::from)))
}
