//! Domain service for accounts.

use std::sync::Arc;

use accounts_sdk::{Account, NewAccount};
use tracing::{debug, info};

use super::error::DomainError;
use super::repo::AccountsRepository;

/// Validates requests and delegates storage to the repository.
pub struct AccountsService {
    repo: Arc<dyn AccountsRepository>,
}

impl AccountsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AccountsRepository>) -> Self {
        Self { repo }
    }

    /// All accounts, or only those owned by `customer_id` when given.
    #[must_use]
    pub fn list_accounts(&self, customer_id: Option<i64>) -> Vec<Account> {
        let mut accounts = self.repo.list_all();
        if let Some(customer_id) = customer_id {
            accounts.retain(|a| a.customer_id == customer_id);
        }
        debug!(?customer_id, count = accounts.len(), "listed accounts");
        accounts
    }

    /// # Errors
    /// [`DomainError::NotFound`] when no account has this id.
    pub fn get_account(&self, id: i64) -> Result<Account, DomainError> {
        self.repo.find_by_id(id).ok_or_else(|| DomainError::not_found(id))
    }

    /// # Errors
    /// [`DomainError::Validation`] when the account number is blank.
    pub fn create_account(&self, new_account: NewAccount) -> Result<Account, DomainError> {
        if new_account.number.trim().is_empty() {
            return Err(DomainError::validation("account number must not be blank"));
        }

        let account = self.repo.create(new_account);
        info!(
            account_id = account.id,
            customer_id = account.customer_id,
            number = %account.number,
            "account created"
        );
        Ok(account)
    }
}
