//! Account lookup used to enrich customers.

use accounts_sdk::Account;
use async_trait::async_trait;

/// Fetches the accounts owned by one customer.
///
/// Implementations never fail: a downstream error yields an empty list and
/// is logged where it happens. Every returned account has
/// `customer_id == customer_id`.
#[async_trait]
pub trait AccountQueryClient: Send + Sync {
    async fn accounts_for_customer(&self, customer_id: i64) -> Vec<Account>;
}
