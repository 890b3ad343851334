//! Unified error handling for the request pipeline.
//!
//! Every layer returns [`AppError`]. Its [`ErrorKind`] is the classification
//! the transport maps to a status code, so no caller has to inspect messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::{ApiResponse, ErrorBody};

/// Classification shared by every layer of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; the caller fixes it and resubmits
    Validation,
    /// Referenced id does not exist
    NotFound,
    /// Entity already exists
    Conflict,
    /// Connectivity, constraint, cancellation or timeout while talking to storage
    Storage,
    /// Anything else; opaque to the caller
    Internal,
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    // Storage errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[source] sea_orm::DbErr),

    #[error("Storage error: {0}")]
    Storage(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            #[cfg(feature = "database")]
            AppError::Database(_) => ErrorKind::Storage,
            AppError::Storage(_) => ErrorKind::Storage,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Storage | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),

            // Hide details for storage/internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                "A storage error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Pick the first failing field in `fields` order so the message does not
    /// depend on hash map iteration.
    pub fn from_validation(errors: &ValidationErrors, fields: &[&str]) -> Self {
        let field_errors = errors.field_errors();
        let message = fields
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .chain(field_errors.values())
            .find_map(|errors| errors.first())
            .and_then(|error| error.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| "Validation failed".to_string());

        AppError::Validation(message)
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse::<()>::error(ErrorBody {
            code: self.code().to_string(),
            message: self.user_message(),
        });

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::FirstNameRequired | DomainError::LastNameRequired => {
                AppError::Validation(err.to_string())
            }
            DomainError::UserNotFound(_) => AppError::NotFound(err.to_string()),
            DomainError::Conflict(entity) => AppError::Conflict(entity),
        }
    }
}

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!("Unique constraint violated: {}", detail);
                AppError::Conflict("User".to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
