//! Customer models.

use accounts_sdk::Account;

use crate::proto;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

/// A customer merged with its accounts. Built per request, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerView {
    pub customer: Customer,
    /// Accounts whose `customer_id` matched at call time; empty when the
    /// accounts service could not be reached.
    pub accounts: Vec<Account>,
}

impl CustomerView {
    #[must_use]
    pub fn new(customer: Customer, accounts: Vec<Account>) -> Self {
        Self { customer, accounts }
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.customer.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.customer.name
    }
}

impl From<CustomerView> for proto::Customer {
    fn from(view: CustomerView) -> Self {
        Self {
            id: view.customer.id,
            name: view.customer.name,
            accounts: view.accounts.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<proto::Customer> for CustomerView {
    fn from(c: proto::Customer) -> Self {
        Self {
            customer: Customer { id: c.id, name: c.name },
            accounts: c.accounts.into_iter().map(Account::from).collect(),
        }
    }
}
