//! In-memory account table.

use accounts_sdk::{Account, NewAccount};
use parking_lot::RwLock;

use crate::domain::repo::AccountsRepository;

#[derive(Debug)]
struct Table {
    rows: Vec<Account>,
    last_id: i64,
}

/// Accounts kept in a `Vec` behind one `RwLock`.
///
/// The id counter lives under the same lock as the rows, so an id is taken
/// and its row appended in one critical section: ids are unique and the table
/// stays ordered by id.
#[derive(Debug)]
pub struct InMemoryAccountsRepository {
    table: RwLock<Table>,
}

impl Default for InMemoryAccountsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAccountsRepository {
    /// Empty table; the first account gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: Vec::new(),
                last_id: 0,
            }),
        }
    }

    /// Table holding `ACC001`, `ACC002` (customer 1) and `ACC003` (customer 2).
    #[must_use]
    pub fn with_demo_data() -> Self {
        let repo = Self::new();
        for (number, customer_id) in [("ACC001", 1), ("ACC002", 1), ("ACC003", 2)] {
            repo.create(NewAccount::new(number, customer_id));
        }
        repo
    }
}

impl AccountsRepository for InMemoryAccountsRepository {
    fn list_all(&self) -> Vec<Account> {
        self.table.read().rows.clone()
    }

    fn find_by_id(&self, id: i64) -> Option<Account> {
        self.table.read().rows.iter().find(|a| a.id == id).cloned()
    }

    fn create(&self, new_account: NewAccount) -> Account {
        let mut table = self.table.write();
        table.last_id += 1;

        let account = Account {
            id: table.last_id,
            number: new_account.number,
            customer_id: new_account.customer_id,
        };
        table.rows.push(account.clone());
        account
    }
}
