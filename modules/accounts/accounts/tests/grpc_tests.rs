#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests: a real accounts server on an ephemeral port driven
//! through the SDK client.

use std::collections::HashSet;
use std::net::SocketAddr;

use accounts::{AccountsConfig, build_service, serve};
use accounts_sdk::{Account, AccountsClientV1, AccountsError, AccountsGrpcClient, NewAccount};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct TestServer {
    addr: SocketAddr,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start(seed_demo_data: bool) -> Self {
        let cfg = AccountsConfig {
            seed_demo_data,
            ..Default::default()
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(serve(listener, build_service(&cfg), cancel.clone()));
        Self { addr, cancel, handle }
    }

    async fn client(&self) -> AccountsGrpcClient {
        AccountsGrpcClient::connect(format!("http://{}", self.addr)).await.unwrap()
    }

    async fn stop(self) {
        self.cancel.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn lists_demo_accounts_in_order() {
    let server = TestServer::start(true).await;
    let client = server.client().await;

    let accounts = client.list_accounts().await.unwrap();
    assert_eq!(
        accounts,
        vec![
            Account {
                id: 1,
                number: "ACC001".to_owned(),
                customer_id: 1
            },
            Account {
                id: 2,
                number: "ACC002".to_owned(),
                customer_id: 1
            },
            Account {
                id: 3,
                number: "ACC003".to_owned(),
                customer_id: 2
            },
        ]
    );

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn create_then_list_contains_account_once() {
    let server = TestServer::start(true).await;
    let client = server.client().await;

    let created = client.create_account(NewAccount::new("ACC010", 1)).await.unwrap();
    assert_eq!(created.id, 4);
    assert_eq!(created.number, "ACC010");
    assert_eq!(created.customer_id, 1);

    let accounts = client.list_accounts().await.unwrap();
    assert_eq!(accounts.iter().filter(|a| a.number == "ACC010").count(), 1);
    assert_eq!(client.get_account(4).await.unwrap(), created);

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn server_side_filter_returns_only_owned_accounts() {
    let server = TestServer::start(true).await;
    let client = server.client().await;

    let accounts = client.list_accounts_for_customer(1).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().all(|a| a.customer_id == 1));
    assert!(client.list_accounts_for_customer(77).await.unwrap().is_empty());

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn errors_map_to_sdk_variants() {
    let server = TestServer::start(true).await;
    let client = server.client().await;

    assert_eq!(client.get_account(99).await.unwrap_err(), AccountsError::not_found(99));

    let err = client.create_account(NewAccount::new("", 1)).await.unwrap_err();
    assert!(matches!(err, AccountsError::Validation { .. }), "{err}");

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn concurrent_remote_creates_get_distinct_ids() {
    let server = TestServer::start(false).await;
    let client = server.client().await;

    let creates = (0..20).map(|i| {
        let client = client.clone();
        async move { client.create_account(NewAccount::new(format!("C{i:03}"), i % 3)).await }
    });
    let created: Vec<Account> = futures::future::try_join_all(creates).await.unwrap();

    let ids: HashSet<i64> = created.iter().map(|a| a.id).collect();
    assert_eq!(ids.len(), 20);
    assert_eq!(ids.iter().copied().max(), Some(20));

    let listed = client.list_accounts().await.unwrap();
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let server = TestServer::start(false).await;
    let client = server.client().await;
    assert!(client.list_accounts().await.unwrap().is_empty());
    drop(client);
    server.stop().await;
}
