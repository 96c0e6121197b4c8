//! Process wiring: repository, service, tonic server.

use std::sync::Arc;

use accounts_sdk::AccountServiceServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

use crate::api::grpc::AccountServiceImpl;
use crate::config::AccountsConfig;
use crate::domain::AccountsService;
use crate::infra::storage::InMemoryAccountsRepository;

/// Build the domain service for `cfg`.
#[must_use]
pub fn build_service(cfg: &AccountsConfig) -> Arc<AccountsService> {
    let repo = if cfg.seed_demo_data {
        InMemoryAccountsRepository::with_demo_data()
    } else {
        InMemoryAccountsRepository::new()
    };
    Arc::new(AccountsService::new(Arc::new(repo)))
}

/// Serve `AccountService` on `listener` until `cancel` fires.
///
/// In-flight requests are allowed to finish after cancellation.
///
/// # Errors
/// Returns transport errors from the tonic server.
pub async fn serve(listener: TcpListener, service: Arc<AccountsService>, cancel: CancellationToken) -> anyhow::Result<()> {
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, service = accounts_sdk::SERVICE_NAME, "gRPC server listening");

    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_service(AccountServiceServer::new(AccountServiceImpl::new(service)))
        .serve_with_incoming_shutdown(incoming, async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::info!(%bound_addr, "gRPC server stopped");
    Ok(())
}
