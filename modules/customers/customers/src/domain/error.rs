use customers_sdk::CustomersError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("customer not found: {id}")]
    NotFound { id: i64 },
}

impl DomainError {
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }
}

impl From<DomainError> for CustomersError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { id } => Self::not_found(id),
        }
    }
}
