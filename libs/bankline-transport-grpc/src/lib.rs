#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
//! gRPC client plumbing shared by the Bankline services.
//!
//! - [`client`]: endpoint construction, eager and lazy channel creation
//! - [`rpc_retry`]: bounded retries for idempotent unary calls
//! - [`circuit_breaker`]: fail-fast cutoff in front of a flaky downstream

pub mod circuit_breaker;
pub mod client;
pub mod rpc_retry;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitError, CircuitOpen, CircuitState};
pub use client::{GrpcClientConfig, connect_lazy, connect_with_retry, connect_with_stack};
pub use rpc_retry::{RpcRetryConfig, call_with_retry};
