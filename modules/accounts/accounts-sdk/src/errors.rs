//! Public error type of the accounts SDK.

use thiserror::Error;
use tonic::{Code, Status};

/// Errors returned by [`crate::AccountsClientV1`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountsError {
    /// No account with this id.
    #[error("account not found: {id}")]
    NotFound { id: i64 },

    /// The request was rejected as invalid.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The accounts service could not be reached or did not answer in time.
    #[error("accounts service unavailable: {0}")]
    Unavailable(String),

    /// Any other failure reported by the service or the transport.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Map a gRPC status; `id` is the account the call was keyed by, if any.
    #[must_use]
    pub fn from_status(status: &Status, id: Option<i64>) -> Self {
        match (status.code(), id) {
            (Code::NotFound, Some(id)) => Self::NotFound { id },
            (Code::InvalidArgument, _) => Self::validation(status.message()),
            (Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled, _) => {
                Self::Unavailable(status.message().to_owned())
            }
            _ => Self::Internal(format!("{:?}: {}", status.code(), status.message())),
        }
    }
}
