use tonic::Status;

use crate::domain::DomainError;

impl From<DomainError> for Status {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { .. } => Status::not_found(e.to_string()),
        }
    }
}
