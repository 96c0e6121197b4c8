//! In-memory customer table.

use customers_sdk::Customer;
use parking_lot::RwLock;

use crate::domain::repo::CustomersRepository;

/// Customers kept in a `Vec` behind one `RwLock`; ids are assigned from 1 in
/// insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCustomersRepository {
    rows: RwLock<Vec<Customer>>,
}

impl InMemoryCustomersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// John Doe (1) and Jane Smith (2).
    #[must_use]
    pub fn with_demo_data() -> Self {
        Self::from_names(["John Doe", "Jane Smith"])
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = names
            .into_iter()
            .zip(1_i64..)
            .map(|(name, id)| Customer { id, name: name.into() })
            .collect();
        Self { rows: RwLock::new(rows) }
    }
}

impl CustomersRepository for InMemoryCustomersRepository {
    fn list_all(&self) -> Vec<Customer> {
        self.rows.read().clone()
    }

    fn find_by_id(&self, id: i64) -> Option<Customer> {
        self.rows.read().iter().find(|c| c.id == id).cloned()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_demo_data() {
        let repo = InMemoryCustomersRepository::with_demo_data();
        let all = repo.list_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], Customer { id: 1, name: "John Doe".to_owned() });
        assert_eq!(repo.find_by_id(2).unwrap().name, "Jane Smith");
        assert!(repo.find_by_id(99).is_none());
    }

    #[test]
    fn test_empty() {
        let repo = InMemoryCustomersRepository::new();
        assert!(repo.list_all().is_empty());
        assert!(repo.find_by_id(1).is_none());
    }
}
