//! [`AccountQueryClient`] backed by the accounts service.

use std::sync::Arc;

use accounts_sdk::{Account, AccountsClientV1, AccountsError};
use async_trait::async_trait;
use bankline_transport_grpc::{CircuitBreaker, CircuitBreakerConfig, CircuitError};
use tracing::{debug, warn};

use crate::domain::AccountQueryClient;

/// Fetches accounts over the accounts SDK and filters them by owner.
///
/// By default the full listing is fetched; with server-side filtering the
/// service is asked for one customer's accounts. The result is filtered
/// locally in both modes. Any failure, including an open circuit, is logged
/// and turned into an empty list.
pub struct RemoteAccountQuery {
    client: Arc<dyn AccountsClientV1>,
    breaker: Option<CircuitBreaker>,
    server_side_filter: bool,
}

impl RemoteAccountQuery {
    #[must_use]
    pub fn new(client: Arc<dyn AccountsClientV1>) -> Self {
        Self {
            client,
            breaker: None,
            server_side_filter: false,
        }
    }

    #[must_use]
    pub fn with_server_side_filter(mut self, enabled: bool) -> Self {
        self.server_side_filter = enabled;
        self
    }

    /// Fail fast while the accounts service keeps failing.
    #[must_use]
    pub fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.breaker = Some(CircuitBreaker::new(accounts_sdk::CLIENT_NAME, config));
        self
    }

    async fn fetch(&self, customer_id: i64) -> Result<Vec<Account>, AccountsError> {
        if self.server_side_filter {
            self.client.list_accounts_for_customer(customer_id).await
        } else {
            self.client.list_accounts().await
        }
    }

    async fn fetch_guarded(&self, customer_id: i64) -> Result<Vec<Account>, AccountsError> {
        let Some(breaker) = &self.breaker else {
            return self.fetch(customer_id).await;
        };

        breaker
            .call(|| self.fetch(customer_id))
            .await
            .map_err(|e| match e {
                CircuitError::Open(open) => AccountsError::Unavailable(open.to_string()),
                CircuitError::Inner(inner) => inner,
            })
    }
}

#[async_trait]
impl AccountQueryClient for RemoteAccountQuery {
    async fn accounts_for_customer(&self, customer_id: i64) -> Vec<Account> {
        match self.fetch_guarded(customer_id).await {
            Ok(mut accounts) => {
                accounts.retain(|a| a.customer_id == customer_id);
                debug!(customer_id, count = accounts.len(), "accounts fetched");
                accounts
            }
            Err(e) => {
                warn!(customer_id, error = %e, "account lookup failed, returning customer without accounts");
                Vec::new()
            }
        }
    }
}
