//! Storage interface used by the aggregation service.

use customers_sdk::Customer;

/// Customer table. Reads return copies in insertion order.
pub trait CustomersRepository: Send + Sync {
    fn list_all(&self) -> Vec<Customer>;

    /// Absence is not an error at this layer.
    fn find_by_id(&self, id: i64) -> Option<Customer>;
}
