//! Error types for lightbnb-db

use thiserror::Error;

use crate::models::ValidationError;

/// Result type alias for repository operations
pub type Result<T> = std::result::Result<T, DbError>;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// Connection loss, constraint violation, malformed statement
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Insert refused because a unique field is already taken
    #[error("conflict: {resource} with {field} '{value}' already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl DbError {
    /// Create a not-found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a conflict error
    pub fn conflict(resource: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::Conflict {
            resource,
            field,
            value: value.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// True for failures that originate in the driver or the server
    /// rather than in the caller's input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Sqlx(_))
    }
}
