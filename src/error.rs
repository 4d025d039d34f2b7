//! Error types for the library API server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// One message per violated field rule
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Caller broke an API precondition (e.g. missing id). Never the client's fault.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body: `{"errors": ["...", ...]}`
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiErrors {
    pub errors: Vec<String>,
}

impl ApiErrors {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BusinessRule(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidArgument(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::NotFound(msg) | AppError::BusinessRule(msg) => ApiErrors::single(msg),
            AppError::Validation(errors) => ApiErrors { errors },
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ApiErrors::single("Database error")
            }
            AppError::InvalidArgument(msg) => {
                tracing::error!("Internal error: {}", msg);
                ApiErrors::single("Internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BusinessRule("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidArgument("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_display() {
        let err = AppError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation error: a, b");
    }
}
