//! gRPC server for `CustomerService`.

use std::sync::Arc;

use customers_sdk::CustomerService;
use customers_sdk::proto::{Customer, CustomerId, CustomerList, ListCustomersRequest};
use tonic::{Request, Response, Status};

use crate::domain::AggregationService;

#[derive(Clone)]
pub struct CustomerServiceImpl {
    service: Arc<AggregationService>,
}

impl CustomerServiceImpl {
    #[must_use]
    pub fn new(service: Arc<AggregationService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl CustomerService for CustomerServiceImpl {
    async fn list_customers(&self, _request: Request<ListCustomersRequest>) -> Result<Response<CustomerList>, Status> {
        let views = self.service.find_all().await;
        Ok(Response::new(CustomerList {
            customers: views.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_customer(&self, request: Request<CustomerId>) -> Result<Response<Customer>, Status> {
        let CustomerId { id } = request.into_inner();
        let view = self.service.find_by_id(id).await?;
        Ok(Response::new(view.into()))
    }
}
