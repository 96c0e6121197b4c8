//! Transport-agnostic account models.

use crate::proto;

/// An account as returned by the accounts service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account {
    pub id: i64,
    pub number: String,
    /// Owning customer. Not checked against the customers service.
    pub customer_id: i64,
}

/// Data for a new account; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub number: String,
    pub customer_id: i64,
}

impl NewAccount {
    #[must_use]
    pub fn new(number: impl Into<String>, customer_id: i64) -> Self {
        Self {
            number: number.into(),
            customer_id,
        }
    }
}

impl From<proto::Account> for Account {
    fn from(a: proto::Account) -> Self {
        Self {
            id: a.id,
            number: a.number,
            customer_id: a.customer_id,
        }
    }
}

impl From<Account> for proto::Account {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            number: a.number,
            customer_id: a.customer_id,
        }
    }
}

impl From<NewAccount> for proto::CreateAccountRequest {
    fn from(n: NewAccount) -> Self {
        Self {
            number: n.number,
            customer_id: n.customer_id,
        }
    }
}

impl From<proto::CreateAccountRequest> for NewAccount {
    fn from(r: proto::CreateAccountRequest) -> Self {
        Self {
            number: r.number,
            customer_id: r.customer_id,
        }
    }
}
