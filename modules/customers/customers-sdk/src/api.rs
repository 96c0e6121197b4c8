//! Customers API trait.

use async_trait::async_trait;

use crate::errors::CustomersError;
use crate::models::CustomerView;

/// Client contract of the customers service. Every customer comes back
/// enriched with its accounts.
#[async_trait]
pub trait CustomersClientV1: Send + Sync {
    /// Every customer in store order.
    async fn list_customers(&self) -> Result<Vec<CustomerView>, CustomersError>;

    async fn get_customer(&self, id: i64) -> Result<CustomerView, CustomersError>;
}
