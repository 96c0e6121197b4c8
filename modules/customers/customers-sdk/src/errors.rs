//! Public error type of the customers SDK.

use thiserror::Error;
use tonic::{Code, Status};

/// Errors returned by [`crate::CustomersClientV1`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomersError {
    /// No customer with this id.
    #[error("customer not found: {id}")]
    NotFound { id: i64 },

    /// The customers service could not be reached or did not answer in time.
    #[error("customers service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CustomersError {
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Map a gRPC status; `id` is the customer the call was keyed by, if any.
    #[must_use]
    pub fn from_status(status: &Status, id: Option<i64>) -> Self {
        match (status.code(), id) {
            (Code::NotFound, Some(id)) => Self::NotFound { id },
            (Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled, _) => {
                Self::Unavailable(status.message().to_owned())
            }
            _ => Self::Internal(format!("{:?}: {}", status.code(), status.message())),
        }
    }
}
