//! Storage interface used by the accounts domain service.

use accounts_sdk::{Account, NewAccount};

/// Account table.
///
/// Ids are assigned by the repository, strictly increasing in creation order
/// and never reused. Reads return copies.
pub trait AccountsRepository: Send + Sync {
    /// Snapshot of all accounts in insertion order.
    fn list_all(&self) -> Vec<Account>;

    /// Absence is not an error at this layer.
    fn find_by_id(&self, id: i64) -> Option<Account>;

    /// Assign the next id and append the account.
    fn create(&self, new_account: NewAccount) -> Account;
}
