//! Accounts service
//!
//! Owns the account records and serves them over gRPC.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - validation and lookups
//! - `infra/storage/in_memory_repo.rs` - lock-protected account table
//! - `api/grpc/server.rs` - tonic `AccountService` implementation
//! - `server.rs` - listener, wiring and graceful shutdown
//!
//! Consumers talk to the service through the `accounts-sdk` crate.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
mod server;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::AccountsConfig;
pub use server::{build_service, serve};
