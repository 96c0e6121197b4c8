//! In-process client implementing [`CustomersClientV1`].

use std::sync::Arc;

use async_trait::async_trait;
use customers_sdk::{CustomerView, CustomersClientV1, CustomersError};

use crate::domain::AggregationService;

/// Calls the aggregation service directly, without a network hop.
pub struct CustomersLocalClient {
    service: Arc<AggregationService>,
}

impl CustomersLocalClient {
    #[must_use]
    pub fn new(service: Arc<AggregationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CustomersClientV1 for CustomersLocalClient {
    async fn list_customers(&self) -> Result<Vec<CustomerView>, CustomersError> {
        Ok(self.service.find_all().await)
    }

    async fn get_customer(&self, id: i64) -> Result<CustomerView, CustomersError> {
        self.service.find_by_id(id).await.map_err(CustomersError::from)
    }
}
