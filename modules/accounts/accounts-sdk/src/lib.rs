//! Accounts SDK
//!
//! Everything needed to talk to the accounts service:
//! - API trait (`AccountsClientV1`) and models
//! - Error type (`AccountsError`)
//! - gRPC client (`AccountsGrpcClient`)
//! - Proto stubs for the server implementation

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

mod api;
mod client;
mod errors;
mod models;

pub use api::AccountsClientV1;
pub use client::AccountsGrpcClient;
pub use errors::AccountsError;
pub use models::{Account, NewAccount};

/// Generated protobuf types and stubs for `AccountService`
#[allow(clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("bankline.accounts.v1");
}

pub use proto::account_service_server::{AccountService, AccountServiceServer};

/// Fully qualified gRPC service name
pub const SERVICE_NAME: &str = "bankline.accounts.v1.AccountService";

/// Downstream name used in client logs and spans
pub const CLIENT_NAME: &str = "accounts";
