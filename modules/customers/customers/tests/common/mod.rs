#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for customers integration tests

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use accounts_sdk::{Account, AccountsClientV1, AccountsError, NewAccount};
use async_trait::async_trait;
use customers::domain::{AccountQueryClient, AggregationService};
use customers::infra::storage::InMemoryCustomersRepository;
use customers::{CustomersConfig, build_service, serve};
use parking_lot::{Mutex, RwLock};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub fn account(id: i64, number: &str, customer_id: i64) -> Account {
    Account {
        id,
        number: number.to_owned(),
        customer_id,
    }
}

pub fn demo_accounts() -> Vec<Account> {
    vec![
        account(1, "ACC001", 1),
        account(2, "ACC002", 1),
        account(3, "ACC003", 2),
    ]
}

/// Account query over an in-memory table that records every lookup.
#[derive(Default)]
pub struct CountingAccountQuery {
    pub accounts: RwLock<Vec<Account>>,
    pub asked: Mutex<Vec<i64>>,
    calls: AtomicUsize,
}

impl CountingAccountQuery {
    pub fn with_accounts(accounts: Vec<Account>) -> Arc<Self> {
        Arc::new(Self {
            accounts: RwLock::new(accounts),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountQueryClient for CountingAccountQuery {
    async fn accounts_for_customer(&self, customer_id: i64) -> Vec<Account> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.asked.lock().push(customer_id);
        self.accounts
            .read()
            .iter()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect()
    }
}

/// Accounts client whose per-customer call fails for selected customers.
pub struct FlakyAccountsClient {
    accounts: Vec<Account>,
    failing_customers: HashSet<i64>,
}

impl FlakyAccountsClient {
    pub fn failing_for(failing_customers: impl IntoIterator<Item = i64>) -> Arc<Self> {
        Arc::new(Self {
            accounts: demo_accounts(),
            failing_customers: failing_customers.into_iter().collect(),
        })
    }
}

#[async_trait]
impl AccountsClientV1 for FlakyAccountsClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountsError> {
        Ok(self.accounts.clone())
    }

    async fn list_accounts_for_customer(&self, customer_id: i64) -> Result<Vec<Account>, AccountsError> {
        if self.failing_customers.contains(&customer_id) {
            return Err(AccountsError::Unavailable(format!("lookup for {customer_id} failed")));
        }
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn get_account(&self, id: i64) -> Result<Account, AccountsError> {
        Err(AccountsError::not_found(id))
    }

    async fn create_account(&self, _new_account: NewAccount) -> Result<Account, AccountsError> {
        Err(AccountsError::Internal("read-only fake".to_owned()))
    }
}

/// Accounts client that never answers and counts the calls it receives.
#[derive(Default)]
pub struct HangingAccountsClient {
    calls: AtomicUsize,
}

impl HangingAccountsClient {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn hang<T>(&self) -> Result<T, AccountsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

#[async_trait]
impl AccountsClientV1 for HangingAccountsClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountsError> {
        self.hang().await
    }

    async fn list_accounts_for_customer(&self, _customer_id: i64) -> Result<Vec<Account>, AccountsError> {
        self.hang().await
    }

    async fn get_account(&self, _id: i64) -> Result<Account, AccountsError> {
        self.hang().await
    }

    async fn create_account(&self, _new_account: NewAccount) -> Result<Account, AccountsError> {
        self.hang().await
    }
}

/// Aggregation over the demo customers and the given account query.
pub fn demo_service(accounts: Arc<dyn AccountQueryClient>) -> AggregationService {
    AggregationService::new(Arc::new(InMemoryCustomersRepository::with_demo_data()), accounts)
}

/// A server task on an ephemeral port, stopped through its token.
pub struct RunningServer {
    pub addr: SocketAddr,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl RunningServer {
    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.cancel.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

pub async fn start_accounts_server() -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let service = accounts::build_service(&accounts::AccountsConfig::default());
    let handle = tokio::spawn(accounts::serve(listener, service, cancel.clone()));
    RunningServer { addr, cancel, handle }
}

pub async fn start_customers_server(cfg: &CustomersConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let service = build_service(cfg).unwrap();
    let handle = tokio::spawn(serve(listener, service, cancel.clone()));
    RunningServer { addr, cancel, handle }
}

/// Customers config pointing at `accounts_uri` with fast failure settings.
pub fn customers_config(accounts_uri: String) -> CustomersConfig {
    let mut cfg = CustomersConfig::default();
    cfg.accounts.uri = accounts_uri;
    cfg.accounts.max_retries = 0;
    cfg.accounts.connect_timeout = std::time::Duration::from_millis(200);
    cfg
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
