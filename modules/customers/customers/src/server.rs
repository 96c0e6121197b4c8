//! Process wiring: accounts client, repository, aggregation, tonic server.

use std::sync::Arc;

use accounts_sdk::AccountsGrpcClient;
use customers_sdk::CustomerServiceServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

use crate::api::grpc::CustomerServiceImpl;
use crate::config::CustomersConfig;
use crate::domain::AggregationService;
use crate::infra::accounts::RemoteAccountQuery;
use crate::infra::storage::InMemoryCustomersRepository;

/// Build the aggregation service for `cfg`.
///
/// The accounts channel is lazy: the service starts even while the accounts
/// service is down and enrichment degrades until it comes up. Must be called
/// inside a tokio runtime.
///
/// # Errors
/// Fails on invalid configuration or an unparsable accounts URI.
pub fn build_service(cfg: &CustomersConfig) -> anyhow::Result<Arc<AggregationService>> {
    cfg.validate()?;

    let grpc_cfg = cfg.accounts.grpc_client_config();
    let client = AccountsGrpcClient::connect_lazy(cfg.accounts.uri.as_str(), &grpc_cfg)?;

    let mut query = RemoteAccountQuery::new(Arc::new(client)).with_server_side_filter(cfg.accounts.server_side_filter);
    if let Some(breaker) = cfg.accounts.circuit_breaker.breaker_config() {
        query = query.with_circuit_breaker(breaker);
    }

    let repo = if cfg.seed_demo_data {
        InMemoryCustomersRepository::with_demo_data()
    } else {
        InMemoryCustomersRepository::new()
    };

    tracing::info!(
        accounts_uri = %cfg.accounts.uri,
        server_side_filter = cfg.accounts.server_side_filter,
        circuit_breaker = cfg.accounts.circuit_breaker.enabled,
        fan_out = cfg.fan_out_concurrency,
        "customers service configured"
    );

    Ok(Arc::new(
        AggregationService::new(Arc::new(repo), Arc::new(query))
            .with_fan_out_concurrency(cfg.fan_out_concurrency)
            .with_enrichment_timeout(cfg.enrichment_timeout),
    ))
}

/// Serve `CustomerService` on `listener` until `cancel` fires.
///
/// # Errors
/// Returns transport errors from the tonic server.
pub async fn serve(listener: TcpListener, service: Arc<AggregationService>, cancel: CancellationToken) -> anyhow::Result<()> {
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, service = customers_sdk::SERVICE_NAME, "gRPC server listening");

    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_service(CustomerServiceServer::new(CustomerServiceImpl::new(service)))
        .serve_with_incoming_shutdown(incoming, async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::info!(%bound_addr, "gRPC server stopped");
    Ok(())
}
