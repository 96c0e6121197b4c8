//! gRPC implementation of [`AccountsClientV1`].

use anyhow::Result;
use async_trait::async_trait;
use bankline_transport_grpc::{GrpcClientConfig, RpcRetryConfig, call_with_retry, connect_lazy, connect_with_retry};
use tonic::transport::Channel;

use crate::api::AccountsClientV1;
use crate::errors::AccountsError;
use crate::models::{Account, NewAccount};
use crate::proto::account_service_client::AccountServiceClient;
use crate::proto::{AccountId, CreateAccountRequest, ListAccountsRequest};

/// Accounts client over a tonic channel.
///
/// Reads are retried on transient failures according to the retry policy;
/// `create_account` is sent exactly once.
#[derive(Clone)]
pub struct AccountsGrpcClient {
    inner: AccountServiceClient<Channel>,
    retry: RpcRetryConfig,
}

impl AccountsGrpcClient {
    /// Connect eagerly with default transport settings and connect retries.
    ///
    /// # Errors
    /// Fails when the service cannot be reached within the retry budget.
    pub async fn connect(uri: impl Into<String>) -> Result<Self> {
        let cfg = GrpcClientConfig::new(crate::CLIENT_NAME);
        let channel = connect_with_retry(uri, &cfg).await?;
        Ok(Self::from_channel(channel, RpcRetryConfig::from(&cfg)))
    }

    /// Build a client whose channel connects on first use.
    ///
    /// # Errors
    /// Fails only on an unparsable URI.
    pub fn connect_lazy(uri: impl Into<String>, cfg: &GrpcClientConfig) -> Result<Self> {
        let channel = connect_lazy(uri, cfg)?;
        Ok(Self::from_channel(channel, RpcRetryConfig::from(cfg)))
    }

    #[must_use]
    pub fn from_channel(channel: Channel, retry: RpcRetryConfig) -> Self {
        Self {
            inner: AccountServiceClient::new(channel),
            retry,
        }
    }

    async fn list(&self, customer_id: Option<i64>) -> Result<Vec<Account>, AccountsError> {
        let response = call_with_retry(&self.retry, "accounts.list_accounts", || {
            let mut client = self.inner.clone();
            async move { client.list_accounts(ListAccountsRequest { customer_id }).await }
        })
        .await
        .map_err(|status| AccountsError::from_status(&status, None))?;

        Ok(response.into_inner().accounts.into_iter().map(Account::from).collect())
    }
}

#[async_trait]
impl AccountsClientV1 for AccountsGrpcClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountsError> {
        self.list(None).await
    }

    async fn list_accounts_for_customer(&self, customer_id: i64) -> Result<Vec<Account>, AccountsError> {
        self.list(Some(customer_id)).await
    }

    async fn get_account(&self, id: i64) -> Result<Account, AccountsError> {
        let response = call_with_retry(&self.retry, "accounts.get_account", || {
            let mut client = self.inner.clone();
            async move { client.get_account(AccountId { id }).await }
        })
        .await
        .map_err(|status| AccountsError::from_status(&status, Some(id)))?;

        Ok(response.into_inner().into())
    }

    async fn create_account(&self, new_account: NewAccount) -> Result<Account, AccountsError> {
        let mut client = self.inner.clone();
        let request: CreateAccountRequest = new_account.into();

        let response = client
            .create_account(request)
            .await
            .map_err(|status| AccountsError::from_status(&status, None))?;

        let account: Account = response.into_inner().into();
        tracing::debug!(account_id = account.id, customer_id = account.customer_id, "account created");
        Ok(account)
    }
}
