//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::constants::{FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED};

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// First name missing or empty on creation or update
    #[error("{}", FIRST_NAME_REQUIRED)]
    FirstNameRequired,

    /// Last name missing or empty on creation or update
    #[error("{}", LAST_NAME_REQUIRED)]
    LastNameRequired,

    /// No user is stored under the given id
    #[error("user '{0}' doesn't exist")]
    UserNotFound(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),
}

impl DomainError {
    /// Create a not found error for a user id
    pub fn user_not_found(id: impl Into<String>) -> Self {
        DomainError::UserNotFound(id.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Whether the error is a caller-side validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::FirstNameRequired | DomainError::LastNameRequired
        )
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
