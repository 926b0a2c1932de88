//! Error handling - maps failures to the response envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_shared::ApiResponse;
use std::fmt;

/// Application-level error type that converts to enveloped responses.
///
/// Authentication failures (401/403) are handled by the `Identity`
/// extractor's own error type; everything after the extractor goes
/// through here.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(Vec<String>),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body: ApiResponse<()> = match self {
            AppError::NotFound(msg) => ApiResponse::failure("NOT_FOUND", msg.clone()),
            AppError::Validation(errors) => {
                ApiResponse::failure("VALIDATION_ERROR", errors.join(", "))
            }
            AppError::Conflict(msg) => ApiResponse::failure("CONFLICT", msg.clone()),
            AppError::Internal(detail) => {
                // Log the detail; never leak it to the caller.
                tracing::error!("Internal error: {}", detail);
                ApiResponse::failure("SERVER_ERROR", "Internal server error")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

// Conversion from domain errors
impl From<quill_core::error::DomainError> for AppError {
    fn from(err: quill_core::error::DomainError) -> Self {
        match err {
            quill_core::error::DomainError::NotFound { slug } => {
                AppError::NotFound(format!("Post not found: {slug}"))
            }
            quill_core::error::DomainError::Validation(msg) => AppError::Validation(vec![msg]),
            quill_core::error::DomainError::Duplicate(_) => {
                AppError::Conflict("A post with this title already exists".to_string())
            }
            quill_core::error::DomainError::Store(e) => e.into(),
        }
    }
}

impl From<quill_core::error::StoreError> for AppError {
    fn from(err: quill_core::error::StoreError) -> Self {
        match err {
            quill_core::error::StoreError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            quill_core::error::StoreError::Constraint(msg) => AppError::Conflict(msg),
            quill_core::error::StoreError::Connection(msg)
            | quill_core::error::StoreError::Query(msg) => {
                tracing::error!("Store error: {}", msg);
                AppError::Internal("Store unavailable".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
