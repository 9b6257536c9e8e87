//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::repositories::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_api_shared::{AuthError, ErrorDetail, ErrorResponse, ValidationErrors};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => ApiError::Conflict(msg),
            RepositoryError::MissingReference(msg) => ApiError::NotFound(msg),
            RepositoryError::Database(err) => ApiError::Database(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Same response whichever half of the credential was wrong
            AuthError::InvalidCredentials => ApiError::NotFound(err.to_string()),
            AuthError::InvalidToken | AuthError::MissingToken => ApiError::Unauthorized,
        }
    }
}

fn detail(code: &str, message: String) -> ErrorDetail {
    ErrorDetail {
        code: code.to_string(),
        message,
        field: None,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errors
                    .into_errors()
                    .into_iter()
                    .map(|e| ErrorDetail {
                        code: "VALIDATION_ERROR".to_string(),
                        message: e.message,
                        field: Some(e.field),
                    })
                    .collect(),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                vec![detail("UNAUTHORIZED", "Unauthorized".to_string())],
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, vec![detail("FORBIDDEN", msg)]),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, vec![detail("NOT_FOUND", msg)]),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, vec![detail("CONFLICT", msg)]),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, vec![detail("BAD_REQUEST", msg)])
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec![detail("INTERNAL_ERROR", "An internal error occurred".to_string())],
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec![detail("DATABASE_ERROR", "A database error occurred".to_string())],
                )
            }
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
