//! gRPC server for `AccountService`.
//!
//! Converts wire messages to domain calls; domain errors become statuses
//! through `From<DomainError> for Status`.

use std::sync::Arc;

use accounts_sdk::AccountService;
use accounts_sdk::proto::{Account, AccountId, AccountList, CreateAccountRequest, ListAccountsRequest};
use tonic::{Request, Response, Status};

use crate::domain::AccountsService;

#[derive(Clone)]
pub struct AccountServiceImpl {
    service: Arc<AccountsService>,
}

impl AccountServiceImpl {
    #[must_use]
    pub fn new(service: Arc<AccountsService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AccountService for AccountServiceImpl {
    async fn list_accounts(&self, request: Request<ListAccountsRequest>) -> Result<Response<AccountList>, Status> {
        let req = request.into_inner();
        let accounts = self.service.list_accounts(req.customer_id);

        Ok(Response::new(AccountList {
            accounts: accounts.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_account(&self, request: Request<AccountId>) -> Result<Response<Account>, Status> {
        let AccountId { id } = request.into_inner();
        let account = self.service.get_account(id)?;
        Ok(Response::new(account.into()))
    }

    async fn create_account(&self, request: Request<CreateAccountRequest>) -> Result<Response<Account>, Status> {
        let account = self.service.create_account(request.into_inner().into())?;
        Ok(Response::new(account.into()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::infra::storage::InMemoryAccountsRepository;
    use tonic::Code;

    fn server() -> AccountServiceImpl {
        let repo = Arc::new(InMemoryAccountsRepository::with_demo_data());
        AccountServiceImpl::new(Arc::new(AccountsService::new(repo)))
    }

    #[tokio::test]
    async fn test_list_accounts_without_filter() {
        let resp = server()
            .list_accounts(Request::new(ListAccountsRequest::default()))
            .await
            .unwrap();
        assert_eq!(resp.into_inner().accounts.len(), 3);
    }

    #[tokio::test]
    async fn test_list_accounts_with_filter() {
        let resp = server()
            .list_accounts(Request::new(ListAccountsRequest { customer_id: Some(2) }))
            .await
            .unwrap();
        let accounts = resp.into_inner().accounts;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].number, "ACC003");
    }

    #[tokio::test]
    async fn test_get_missing_account_is_not_found() {
        let status = server().get_account(Request::new(AccountId { id: 99 })).await.unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_create_blank_number_is_invalid_argument() {
        let status = server()
            .create_account(Request::new(CreateAccountRequest {
                number: String::new(),
                customer_id: 1,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }
}
