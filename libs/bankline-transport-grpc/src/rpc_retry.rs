//! Retry helper for idempotent unary gRPC calls.
//!
//! Only transient codes are retried:
//! - [`tonic::Code::Unavailable`]
//! - [`tonic::Code::DeadlineExceeded`]
//!
//! Every other status is returned on the first failure. Do not wrap calls
//! that create resources: a retry after a lost response duplicates the write.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tonic::{Code, Status};
use tracing::Instrument;

fn duration_to_u64_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Retry policy for [`call_with_retry`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RpcRetryConfig {
    /// Retries after the initial call; `0` disables retrying.
    pub max_retries: u32,

    /// Backoff step; the n-th retry waits `base_backoff * n`.
    pub base_backoff: Duration,

    /// Upper bound for a single backoff.
    pub max_backoff: Duration,
}

impl Default for RpcRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl From<&crate::client::GrpcClientConfig> for RpcRetryConfig {
    fn from(cfg: &crate::client::GrpcClientConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            base_backoff: cfg.base_backoff,
            max_backoff: cfg.max_backoff,
        }
    }
}

impl RpcRetryConfig {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn with_base_backoff(mut self, duration: Duration) -> Self {
        self.base_backoff = duration;
        self
    }

    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        (self.base_backoff * attempt).min(self.max_backoff)
    }
}

/// Whether a failed call may be attempted again.
#[must_use]
pub fn is_retryable(status: &Status) -> bool {
    matches!(status.code(), Code::Unavailable | Code::DeadlineExceeded)
}

/// Run `call` until it succeeds, fails with a non-retryable status, or the
/// retry budget in `cfg` is spent.
///
/// `call` is invoked once per attempt and must build a fresh request each
/// time; tonic clients are cheap to clone inside it.
///
/// # Errors
/// Returns the last `Status` when every attempt failed or the failure was not
/// retryable.
pub async fn call_with_retry<F, Fut, Res>(
    cfg: &RpcRetryConfig,
    op_name: &'static str,
    mut call: F,
) -> Result<Res, Status>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Res, Status>>,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let span = tracing::debug_span!("grpc_call", op = op_name, attempt);
        let result = call().instrument(span).await;

        let status = match result {
            Ok(res) => {
                if attempt > 1 {
                    tracing::info!(op = op_name, attempt, "gRPC call succeeded after retries");
                }
                return Ok(res);
            }
            Err(status) => status,
        };

        if !is_retryable(&status) || attempt > cfg.max_retries {
            tracing::debug!(
                op = op_name,
                attempt,
                code = ?status.code(),
                message = %status.message(),
                "gRPC call giving up"
            );
            return Err(status);
        }

        let backoff = cfg.backoff_for(attempt);
        tracing::debug!(
            op = op_name,
            attempt,
            code = ?status.code(),
            backoff_ms = duration_to_u64_ms(backoff),
            "retrying gRPC call after backoff"
        );
        sleep(backoff).await;
    }
}
