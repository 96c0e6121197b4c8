//! Customers SDK
//!
//! - API trait (`CustomersClientV1`) and models (`Customer`, `CustomerView`)
//! - Error type (`CustomersError`)
//! - gRPC client (`CustomersGrpcClient`)
//! - Proto stubs for the server implementation

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

mod api;
mod client;
mod errors;
mod models;

pub use api::CustomersClientV1;
pub use client::CustomersGrpcClient;
pub use errors::CustomersError;
pub use models::{Customer, CustomerView};

/// Generated protobuf types and stubs for `CustomerService`
#[allow(clippy::pedantic, clippy::empty_structs_with_brackets)]
pub mod proto {
    tonic::include_proto!("bankline.customers.v1");
}

pub use proto::customer_service_server::{CustomerService, CustomerServiceServer};

/// Fully qualified gRPC service name
pub const SERVICE_NAME: &str = "bankline.customers.v1.CustomerService";

/// Downstream name used in client logs and spans
pub const CLIENT_NAME: &str = "customers";
