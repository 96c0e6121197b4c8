#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Aggregation behaviour over in-process account queries.

mod common;

use std::sync::Arc;
use std::time::Duration;

use bankline_transport_grpc::CircuitBreakerConfig;
use common::{CountingAccountQuery, FlakyAccountsClient, HangingAccountsClient, account, demo_accounts, demo_service};
use customers::CustomersLocalClient;
use customers::domain::{AggregationService, DomainError};
use customers::infra::accounts::RemoteAccountQuery;
use customers::infra::storage::InMemoryCustomersRepository;
use customers_sdk::{CustomersClientV1, CustomersError};

#[tokio::test]
async fn find_all_enriches_every_customer() {
    let accounts = CountingAccountQuery::with_accounts(demo_accounts());
    let svc = demo_service(accounts.clone());

    let views = svc.find_all().await;

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].name(), "John Doe");
    assert_eq!(
        views[0].accounts.iter().map(|a| a.number.as_str()).collect::<Vec<_>>(),
        ["ACC001", "ACC002"]
    );
    assert_eq!(views[1].name(), "Jane Smith");
    assert_eq!(views[1].accounts, vec![account(3, "ACC003", 2)]);
    assert_eq!(accounts.calls(), 2);
}

#[tokio::test]
async fn find_by_id_enriches_one_customer() {
    let accounts = CountingAccountQuery::with_accounts(demo_accounts());
    let svc = demo_service(accounts.clone());

    let view = svc.find_by_id(2).await.unwrap();

    assert_eq!(view.id(), 2);
    assert_eq!(view.name(), "Jane Smith");
    assert_eq!(view.accounts, vec![account(3, "ACC003", 2)]);
    assert_eq!(*accounts.asked.lock(), [2]);
}

#[tokio::test]
async fn find_by_id_unknown_makes_no_lookup() {
    let accounts = CountingAccountQuery::with_accounts(demo_accounts());
    let svc = demo_service(accounts.clone());

    assert_eq!(svc.find_by_id(99).await.unwrap_err(), DomainError::not_found(99));
    assert_eq!(accounts.calls(), 0);
}

#[tokio::test]
async fn find_all_over_empty_store_makes_no_lookup() {
    let accounts = CountingAccountQuery::with_accounts(demo_accounts());
    let svc = AggregationService::new(Arc::new(InMemoryCustomersRepository::new()), accounts.clone());

    assert!(svc.find_all().await.is_empty());
    assert_eq!(accounts.calls(), 0);
}

#[tokio::test]
async fn new_account_shows_up_on_next_request() {
    let accounts = CountingAccountQuery::with_accounts(demo_accounts());
    let svc = demo_service(accounts.clone());

    assert_eq!(svc.find_by_id(1).await.unwrap().accounts.len(), 2);
    accounts.accounts.write().push(account(4, "ACC010", 1));

    let view = svc.find_by_id(1).await.unwrap();
    assert_eq!(view.accounts.iter().filter(|a| a.number == "ACC010").count(), 1);
    assert_eq!(view.accounts.len(), 3);
}

#[tokio::test]
async fn failed_enrichment_returns_customer_without_accounts() {
    let remote = RemoteAccountQuery::new(FlakyAccountsClient::failing_for([1])).with_server_side_filter(true);
    let svc = demo_service(Arc::new(remote));

    let john = svc.find_by_id(1).await.unwrap();
    assert_eq!(john.name(), "John Doe");
    assert!(john.accounts.is_empty());

    let views = svc.find_all().await;
    assert!(views[0].accounts.is_empty());
    assert_eq!(views[1].accounts, vec![account(3, "ACC003", 2)], "other customers are unaffected");
}

#[tokio::test]
async fn timed_out_lookups_open_the_circuit() {
    let hanging = Arc::new(HangingAccountsClient::default());
    let remote = RemoteAccountQuery::new(hanging.clone()).with_circuit_breaker(CircuitBreakerConfig {
        failure_threshold: 1,
        success_threshold: 1,
        open_timeout: Duration::from_secs(60),
    });
    let svc = demo_service(Arc::new(remote)).with_enrichment_timeout(Duration::from_millis(20));

    for _ in 0..5 {
        let john = svc.find_by_id(1).await.unwrap();
        assert!(john.accounts.is_empty());
    }
    assert_eq!(hanging.calls(), 1, "later lookups are rejected by the open circuit");
}

#[tokio::test]
async fn every_view_holds_exactly_the_owned_accounts() {
    let table = vec![
        account(1, "A", 3),
        account(2, "B", 1),
        account(3, "C", 3),
        account(4, "D", 7),
        account(5, "E", 2),
    ];
    let accounts = CountingAccountQuery::with_accounts(table.clone());
    let repo = InMemoryCustomersRepository::from_names(["a", "b", "c", "d"]);
    let svc = AggregationService::new(Arc::new(repo), accounts).with_fan_out_concurrency(2);

    for view in svc.find_all().await {
        let expected: Vec<_> = table.iter().filter(|a| a.customer_id == view.id()).cloned().collect();
        assert_eq!(view.accounts, expected, "customer {}", view.id());
    }
}

#[tokio::test]
async fn local_client_maps_domain_errors() {
    let accounts = CountingAccountQuery::with_accounts(demo_accounts());
    let client = CustomersLocalClient::new(Arc::new(demo_service(accounts)));

    assert_eq!(client.list_customers().await.unwrap().len(), 2);
    assert_eq!(client.get_customer(1).await.unwrap().accounts.len(), 2);

    let err = client.get_customer(42).await.unwrap_err();
    assert_eq!(err, CustomersError::not_found(42));
    assert!(err.is_not_found());
}
