//! Accounts API trait.

use async_trait::async_trait;

use crate::errors::AccountsError;
use crate::models::{Account, NewAccount};

/// Client contract of the accounts service.
///
/// Implemented by the gRPC client in this crate and by in-process fakes in
/// consumer tests.
#[async_trait]
pub trait AccountsClientV1: Send + Sync {
    /// Every account, in creation order.
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountsError>;

    /// Accounts of one customer, filtered by the service.
    async fn list_accounts_for_customer(&self, customer_id: i64) -> Result<Vec<Account>, AccountsError>;

    async fn get_account(&self, id: i64) -> Result<Account, AccountsError>;

    /// Create an account. Never retried by the client.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account, AccountsError>;
}
