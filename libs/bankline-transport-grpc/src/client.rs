//! gRPC client transport configuration and channel creation.
//!
//! Channels built here carry:
//! - a connect timeout and a per-RPC deadline
//! - TCP and HTTP/2 keepalive so dead peers are noticed
//! - a tracing span around connection establishment
//!
//! Retrying individual calls is the job of [`crate::rpc_retry`]; this module
//! only retries the initial connect in [`connect_with_retry`].

use std::time::Duration;

use anyhow::Context;
use tonic::transport::{Channel, Endpoint};
use tracing::Instrument;

fn duration_to_u64_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Transport settings for one downstream gRPC service.
#[derive(Debug, Clone)]
pub struct GrpcClientConfig {
    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,

    /// Deadline applied to every RPC on the channel.
    pub rpc_timeout: Duration,

    /// Connect attempts after the first one in [`connect_with_retry`].
    ///
    /// Also the default for [`crate::rpc_retry::RpcRetryConfig`].
    pub max_retries: u32,

    /// Backoff step; the n-th retry waits `base_backoff * n`.
    pub base_backoff: Duration,

    /// Upper bound for a single backoff.
    pub max_backoff: Duration,

    /// Downstream name used in logs and spans.
    pub service_name: &'static str,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            rpc_timeout: Duration::from_secs(10),
            max_retries: 3,
            base_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
            service_name: "grpc_client",
        }
    }
}

impl GrpcClientConfig {
    /// Create a configuration with defaults for the named downstream.
    #[must_use]
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the linear backoff step and its cap.
    #[must_use]
    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.base_backoff = base;
        self.max_backoff = max;
        self
    }
}

/// Build a tonic `Endpoint` with timeouts and keepalive settings.
fn build_endpoint(uri: String, cfg: &GrpcClientConfig) -> Result<Endpoint, tonic::transport::Error> {
    let endpoint = Endpoint::from_shared(uri)?
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.rpc_timeout)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .http2_keep_alive_interval(Duration::from_secs(30))
        .keep_alive_timeout(Duration::from_secs(10))
        .keep_alive_while_idle(true);

    Ok(endpoint)
}

/// Connect to a gRPC service once, without retries.
///
/// # Errors
/// Returns an error if the URI is invalid or the connection cannot be established
/// within `connect_timeout`.
pub async fn connect_with_stack(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Channel> {
    let uri_string = uri.into();
    let span = tracing::debug_span!("grpc_connect", service = cfg.service_name, uri = %uri_string);

    async move {
        let endpoint = build_endpoint(uri_string, cfg)?;
        let channel = endpoint.connect().await?;

        tracing::info!(
            service = cfg.service_name,
            connect_timeout_ms = duration_to_u64_ms(cfg.connect_timeout),
            rpc_timeout_ms = duration_to_u64_ms(cfg.rpc_timeout),
            "gRPC client connected"
        );

        Ok::<_, anyhow::Error>(channel)
    }
    .instrument(span)
    .await
}

/// Connect to a gRPC service, retrying the connect with linear backoff.
///
/// # Errors
/// Returns the last connection error once `max_retries` retries are exhausted.
pub async fn connect_with_retry(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Channel> {
    let uri_string = uri.into();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        match connect_with_stack(uri_string.as_str(), cfg).await {
            Ok(channel) => {
                if attempt > 1 {
                    tracing::info!(
                        service = cfg.service_name,
                        attempt,
                        "gRPC connection established after retries"
                    );
                }
                return Ok(channel);
            }
            Err(e) if attempt <= cfg.max_retries => {
                let backoff = (cfg.base_backoff * attempt).min(cfg.max_backoff);
                tracing::warn!(
                    service = cfg.service_name,
                    attempt,
                    max_retries = cfg.max_retries,
                    error = %e,
                    backoff_ms = duration_to_u64_ms(backoff),
                    "gRPC connection failed, retrying"
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => {
                tracing::error!(
                    service = cfg.service_name,
                    attempt,
                    error = %e,
                    "gRPC connection failed after all retries"
                );
                return Err(e).context(format!(
                    "failed to connect to {} after {} attempts",
                    cfg.service_name, attempt
                ));
            }
        }
    }
}

/// Create a channel that connects on first use.
///
/// The caller can start even while the downstream is down; calls made before
/// it comes up fail with `UNAVAILABLE` instead of blocking startup.
///
/// # Errors
/// Returns an error only if the URI cannot be parsed.
pub fn connect_lazy(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Channel> {
    let uri_string = uri.into();
    let endpoint = build_endpoint(uri_string.clone(), cfg)
        .with_context(|| format!("invalid {} endpoint '{uri_string}'", cfg.service_name))?;

    tracing::debug!(service = cfg.service_name, uri = %uri_string, "lazy gRPC channel created");
    Ok(endpoint.connect_lazy())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GrpcClientConfig::default();
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
        assert_eq!(cfg.rpc_timeout, Duration::from_secs(10));
        assert_eq!(cfg.max_retries, 3);
        assert!(cfg.max_backoff >= cfg.base_backoff);
    }

    #[test]
    fn test_config_builder() {
        let cfg = GrpcClientConfig::new("accounts")
            .with_connect_timeout(Duration::from_millis(250))
            .with_rpc_timeout(Duration::from_secs(1))
            .with_max_retries(0)
            .with_backoff(Duration::from_millis(5), Duration::from_millis(20));

        assert_eq!(cfg.service_name, "accounts");
        assert_eq!(cfg.connect_timeout, Duration::from_millis(250));
        assert_eq!(cfg.rpc_timeout, Duration::from_secs(1));
        assert_eq!(cfg.max_retries, 0);
        assert_eq!(cfg.base_backoff, Duration::from_millis(5));
        assert_eq!(cfg.max_backoff, Duration::from_millis(20));
    }

    #[test]
    fn test_build_endpoint_succeeds() {
        let cfg = GrpcClientConfig::default();
        assert!(build_endpoint("http://localhost:50051".to_owned(), &cfg).is_ok());
    }

    #[test]
    fn test_build_endpoint_empty_uri() {
        let cfg = GrpcClientConfig::default();
        assert!(build_endpoint(String::new(), &cfg).is_err());
    }

    #[tokio::test]
    async fn test_connect_lazy_does_not_dial() {
        // Nothing listens on port 1; a lazy channel must still be created.
        let cfg = GrpcClientConfig::new("lazy");
        assert!(connect_lazy("http://127.0.0.1:1", &cfg).is_ok());
    }

    #[tokio::test]
    async fn test_connect_lazy_rejects_bad_uri() {
        let cfg = GrpcClientConfig::new("lazy");
        let err = connect_lazy("not a uri", &cfg).unwrap_err();
        assert!(err.to_string().contains("lazy"));
    }

    #[tokio::test]
    async fn test_connect_with_retry_gives_up() {
        let cfg = GrpcClientConfig::new("nowhere")
            .with_connect_timeout(Duration::from_millis(100))
            .with_max_retries(1)
            .with_backoff(Duration::from_millis(1), Duration::from_millis(1));

        let err = connect_with_retry("http://127.0.0.1:1", &cfg).await.unwrap_err();
        assert!(err.to_string().contains("after 2 attempts"), "{err}");
    }
}
