pub mod account_query;
pub mod error;
pub mod repo;
pub mod service;

pub use account_query::AccountQueryClient;
pub use error::DomainError;
pub use repo::CustomersRepository;
pub use service::AggregationService;
