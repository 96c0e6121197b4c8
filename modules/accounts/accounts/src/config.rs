//! Configuration for the accounts service.

use std::net::{Ipv4Addr, SocketAddr};

use bankline_bootstrap::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `ACCOUNTS__LISTEN_ADDR`.
pub const ENV_PREFIX: &str = "ACCOUNTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccountsConfig {
    /// gRPC listen address.
    pub listen_addr: SocketAddr,

    /// Start with the three demo accounts.
    pub seed_demo_data: bool,

    pub logging: LoggingConfig,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9091)),
            seed_demo_data: true,
            logging: LoggingConfig::default(),
        }
    }
}
