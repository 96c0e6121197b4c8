//! Customers service
//!
//! Serves customers enriched with the accounts they own. Accounts live in a
//! separate service and are fetched over gRPC per customer; when that call
//! fails the customer is still returned, with an empty account list.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - aggregation: lookup, bounded fan-out, merge
//! - `domain/account_query.rs` - the enrichment capability the service needs
//! - `infra/accounts/remote_query.rs` - that capability over the accounts SDK
//! - `infra/storage/in_memory_repo.rs` - customer table
//! - `api/grpc/server.rs` - tonic `CustomerService` implementation

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod local_client;
mod server;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::CustomersConfig;
pub use local_client::CustomersLocalClient;
pub use server::{build_service, serve};
