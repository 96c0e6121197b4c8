//! gRPC implementation of [`CustomersClientV1`].

use anyhow::Result;
use async_trait::async_trait;
use bankline_transport_grpc::{GrpcClientConfig, RpcRetryConfig, call_with_retry, connect_with_retry};
use tonic::transport::Channel;

use crate::api::CustomersClientV1;
use crate::errors::CustomersError;
use crate::models::CustomerView;
use crate::proto::customer_service_client::CustomerServiceClient;
use crate::proto::{CustomerId, ListCustomersRequest};

/// Customers client over a tonic channel. Both calls are reads and are
/// retried on transient failures.
#[derive(Clone)]
pub struct CustomersGrpcClient {
    inner: CustomerServiceClient<Channel>,
    retry: RpcRetryConfig,
}

impl CustomersGrpcClient {
    /// Connect eagerly with default transport settings and connect retries.
    ///
    /// # Errors
    /// Fails when the service cannot be reached within the retry budget.
    pub async fn connect(uri: impl Into<String>) -> Result<Self> {
        let cfg = GrpcClientConfig::new(crate::CLIENT_NAME);
        let channel = connect_with_retry(uri, &cfg).await?;
        Ok(Self::from_channel(channel, RpcRetryConfig::from(&cfg)))
    }

    #[must_use]
    pub fn from_channel(channel: Channel, retry: RpcRetryConfig) -> Self {
        Self {
            inner: CustomerServiceClient::new(channel),
            retry,
        }
    }
}

#[async_trait]
impl CustomersClientV1 for CustomersGrpcClient {
    async fn list_customers(&self) -> Result<Vec<CustomerView>, CustomersError> {
        let response = call_with_retry(&self.retry, "customers.list_customers", || {
            let mut client = self.inner.clone();
            async move { client.list_customers(ListCustomersRequest {}).await }
        })
        .await
        .map_err(|status| CustomersError::from_status(&status, None))?;

        Ok(response.into_inner().customers.into_iter().map(CustomerView::from).collect())
    }

    async fn get_customer(&self, id: i64) -> Result<CustomerView, CustomersError> {
        let response = call_with_retry(&self.retry, "customers.get_customer", || {
            let mut client = self.inner.clone();
            async move { client.get_customer(CustomerId { id }).await }
        })
        .await
        .map_err(|status| CustomersError::from_status(&status, Some(id)))?;

        Ok(response.into_inner().into())
    }
}
