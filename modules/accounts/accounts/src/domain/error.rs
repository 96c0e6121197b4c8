//! Domain error types for the accounts service.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("account not found: {id}")]
    NotFound { id: i64 },

    #[error("validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
