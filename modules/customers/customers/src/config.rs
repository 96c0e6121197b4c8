//! Configuration for the customers service.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::ensure;
use bankline_bootstrap::LoggingConfig;
use bankline_transport_grpc::{CircuitBreakerConfig, GrpcClientConfig};
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `CUSTOMERS__ACCOUNTS__URI`.
pub const ENV_PREFIX: &str = "CUSTOMERS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CustomersConfig {
    /// gRPC listen address.
    pub listen_addr: SocketAddr,

    /// Start with John Doe (1) and Jane Smith (2).
    pub seed_demo_data: bool,

    /// Customers enriched concurrently by one listing request.
    pub fan_out_concurrency: usize,

    /// Upper bound for one customer's enrichment, retries included.
    #[serde(with = "bankline_bootstrap::duration_serde")]
    pub enrichment_timeout: Duration,

    pub accounts: AccountsClientConfig,

    pub logging: LoggingConfig,
}

impl Default for CustomersConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9090)),
            seed_demo_data: true,
            fan_out_concurrency: 8,
            enrichment_timeout: Duration::from_secs(2),
            accounts: AccountsClientConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CustomersConfig {
    /// Reject settings the service cannot run with.
    ///
    /// # Errors
    /// Names the first offending key.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.fan_out_concurrency >= 1, "fan_out_concurrency must be at least 1");
        ensure!(!self.enrichment_timeout.is_zero(), "enrichment_timeout must be positive");
        ensure!(!self.accounts.uri.trim().is_empty(), "accounts.uri must not be empty");
        ensure!(
            self.accounts.base_backoff <= self.accounts.max_backoff,
            "accounts.base_backoff must not exceed accounts.max_backoff"
        );
        let breaker = &self.accounts.circuit_breaker;
        if breaker.enabled {
            ensure!(
                breaker.failure_threshold >= 1 && breaker.success_threshold >= 1,
                "accounts.circuit_breaker thresholds must be at least 1"
            );
        }
        Ok(())
    }
}

/// Connection to the accounts service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccountsClientConfig {
    pub uri: String,

    #[serde(with = "bankline_bootstrap::duration_serde")]
    pub connect_timeout: Duration,

    /// Deadline of a single RPC attempt.
    #[serde(with = "bankline_bootstrap::duration_serde")]
    pub rpc_timeout: Duration,

    /// Retries of the account listing on `UNAVAILABLE` / `DEADLINE_EXCEEDED`.
    pub max_retries: u32,

    #[serde(with = "bankline_bootstrap::duration_serde")]
    pub base_backoff: Duration,

    #[serde(with = "bankline_bootstrap::duration_serde")]
    pub max_backoff: Duration,

    /// Ask the accounts service to filter by customer. Results are filtered
    /// locally either way.
    pub server_side_filter: bool,

    pub circuit_breaker: BreakerSettings,
}

impl Default for AccountsClientConfig {
    fn default() -> Self {
        Self {
            uri: "http://127.0.0.1:9091".to_owned(),
            connect_timeout: Duration::from_secs(1),
            rpc_timeout: Duration::from_millis(500),
            max_retries: 2,
            base_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_millis(500),
            server_side_filter: false,
            circuit_breaker: BreakerSettings::default(),
        }
    }
}

impl AccountsClientConfig {
    #[must_use]
    pub fn grpc_client_config(&self) -> GrpcClientConfig {
        GrpcClientConfig::new(accounts_sdk::CLIENT_NAME)
            .with_connect_timeout(self.connect_timeout)
            .with_rpc_timeout(self.rpc_timeout)
            .with_max_retries(self.max_retries)
            .with_backoff(self.base_backoff, self.max_backoff)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BreakerSettings {
    pub enabled: bool,
    pub failure_threshold: u32,
    pub success_threshold: u32,
    #[serde(with = "bankline_bootstrap::duration_serde")]
    pub open_timeout: Duration,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        let defaults = CircuitBreakerConfig::default();
        Self {
            enabled: false,
            failure_threshold: defaults.failure_threshold,
            success_threshold: defaults.success_threshold,
            open_timeout: defaults.open_timeout,
        }
    }
}

impl BreakerSettings {
    /// Breaker thresholds, or `None` when breaking is disabled.
    #[must_use]
    pub fn breaker_config(&self) -> Option<CircuitBreakerConfig> {
        self.enabled.then(|| CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            success_threshold: self.success_threshold,
            open_timeout: self.open_timeout,
        })
    }
}
