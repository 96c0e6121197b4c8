//! Aggregation of customers with their accounts.

use std::sync::Arc;
use std::time::Duration;

use customers_sdk::{Customer, CustomerView};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::account_query::AccountQueryClient;
use super::error::DomainError;
use super::repo::CustomersRepository;

/// Looks customers up and merges in their accounts.
///
/// Every call is a single pass over the store; nothing is cached between
/// requests. Enrichment of one customer never affects another: a slow or
/// failing lookup degrades that customer alone to an empty account list.
pub struct AggregationService {
    repo: Arc<dyn CustomersRepository>,
    accounts: Arc<dyn AccountQueryClient>,
    fan_out_concurrency: usize,
    enrichment_timeout: Duration,
}

impl AggregationService {
    pub const DEFAULT_FAN_OUT: usize = 8;
    pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(2);

    #[must_use]
    pub fn new(repo: Arc<dyn CustomersRepository>, accounts: Arc<dyn AccountQueryClient>) -> Self {
        Self {
            repo,
            accounts,
            fan_out_concurrency: Self::DEFAULT_FAN_OUT,
            enrichment_timeout: Self::DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Concurrent enrichments per listing; values below 1 are raised to 1.
    #[must_use]
    pub fn with_fan_out_concurrency(mut self, n: usize) -> Self {
        self.fan_out_concurrency = n.max(1);
        self
    }

    #[must_use]
    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    /// Every customer in store order, each with its accounts.
    ///
    /// Enrichment runs with at most `fan_out_concurrency` lookups in flight;
    /// the output order follows the store regardless of completion order.
    /// Dropping the returned future cancels the outstanding lookups.
    pub async fn find_all(&self) -> Vec<CustomerView> {
        let customers = self.repo.list_all();
        if customers.is_empty() {
            return Vec::new();
        }

        debug!(count = customers.len(), fan_out = self.fan_out_concurrency, "enriching customers");
        stream::iter(customers)
            .map(|customer| self.enrich(customer))
            .buffered(self.fan_out_concurrency)
            .collect()
            .await
    }

    /// One customer with its accounts.
    ///
    /// # Errors
    /// [`DomainError::NotFound`] when the id is unknown; no account lookup is
    /// made in that case.
    pub async fn find_by_id(&self, id: i64) -> Result<CustomerView, DomainError> {
        let customer = self.repo.find_by_id(id).ok_or_else(|| DomainError::not_found(id))?;
        Ok(self.enrich(customer).await)
    }

    async fn enrich(&self, customer: Customer) -> CustomerView {
        let lookup = self.accounts.accounts_for_customer(customer.id);

        let accounts = if let Ok(accounts) = tokio::time::timeout(self.enrichment_timeout, lookup).await {
            accounts
        } else {
            warn!(
                customer_id = customer.id,
                timeout = ?self.enrichment_timeout,
                "account lookup timed out, returning customer without accounts"
            );
            Vec::new()
        };

        CustomerView::new(customer, accounts)
    }
}
