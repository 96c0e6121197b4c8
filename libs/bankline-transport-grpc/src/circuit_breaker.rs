//! Consecutive-failure circuit breaker for downstream calls.
//!
//! `Closed` lets calls through and counts consecutive failures. Reaching
//! `failure_threshold` opens the circuit: calls are rejected without touching
//! the network until `open_timeout` elapses. The next call then runs as a
//! half-open probe; `success_threshold` successful probes close the circuit,
//! a single failed probe opens it again. Only one probe is in flight at a
//! time; other callers are rejected until it finishes.
//!
//! A call whose future is dropped before it completes, e.g. by an outer
//! timeout, counts as a failure.

use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Thresholds for [`CircuitBreaker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// Successful half-open probes needed to close it again.
    pub success_threshold: u32,
    /// How long the circuit stays open before probing.
    pub open_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 1,
            open_timeout: Duration::from_secs(10),
        }
    }
}

/// Returned instead of running the call while the circuit is open.
#[derive(Debug, Clone, thiserror::Error)]
#[error("circuit '{name}' is open")]
pub struct CircuitOpen {
    pub name: &'static str,
}

/// Error of a call made through [`CircuitBreaker::call`].
#[derive(Debug, thiserror::Error)]
pub enum CircuitError<E> {
    #[error(transparent)]
    Open(CircuitOpen),
    #[error(transparent)]
    Inner(E),
}

#[derive(Debug)]
struct Inner {
    state: CircuitState,
    consecutive_failures: u32,
    probe_successes: u32,
    probe_in_flight: bool,
    opened_at: Option<Instant>,
}

/// Shared breaker; one instance guards one downstream.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: &'static str,
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    #[must_use]
    pub fn new(name: &'static str, config: CircuitBreakerConfig) -> Self {
        Self {
            name,
            config,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                probe_successes: 0,
                probe_in_flight: false,
                opened_at: None,
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// Ask for permission to call the downstream.
    ///
    /// A granted half-open probe must be settled with [`record_success`] or
    /// [`record_failure`] before the next caller is let through.
    ///
    /// # Errors
    /// Returns [`CircuitOpen`] while the circuit is open and `open_timeout`
    /// has not elapsed yet, or while another half-open probe is in flight.
    ///
    /// [`record_success`]: Self::record_success
    /// [`record_failure`]: Self::record_failure
    pub fn try_acquire(&self) -> Result<(), CircuitOpen> {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => Ok(()),
            CircuitState::HalfOpen if inner.probe_in_flight => Err(CircuitOpen { name: self.name }),
            CircuitState::HalfOpen => {
                inner.probe_in_flight = true;
                Ok(())
            }
            CircuitState::Open => {
                let elapsed = inner.opened_at.map_or(Duration::MAX, |t| t.elapsed());
                if elapsed < self.config.open_timeout {
                    return Err(CircuitOpen { name: self.name });
                }

                debug!(circuit = self.name, "circuit half-open, probing downstream");
                inner.state = CircuitState::HalfOpen;
                inner.probe_successes = 0;
                inner.probe_in_flight = true;
                Ok(())
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.inner.lock();
        inner.probe_in_flight = false;
        match inner.state {
            CircuitState::HalfOpen => {
                inner.probe_successes += 1;
                if inner.probe_successes >= self.config.success_threshold {
                    debug!(circuit = self.name, "circuit closed");
                    inner.state = CircuitState::Closed;
                    inner.consecutive_failures = 0;
                    inner.opened_at = None;
                }
            }
            CircuitState::Closed => inner.consecutive_failures = 0,
            CircuitState::Open => {}
        }
    }

    pub fn record_failure(&self) {
        let mut inner = self.inner.lock();
        inner.probe_in_flight = false;
        match inner.state {
            CircuitState::HalfOpen => {
                warn!(circuit = self.name, "half-open probe failed, circuit re-opened");
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
            }
            CircuitState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.config.failure_threshold {
                    warn!(
                        circuit = self.name,
                        failures = inner.consecutive_failures,
                        "circuit opened"
                    );
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Run `op` through the breaker, recording its outcome.
    ///
    /// Dropping the returned future before `op` completes records a failure.
    ///
    /// # Errors
    /// [`CircuitError::Open`] when the call was rejected, otherwise the
    /// operation's own error wrapped in [`CircuitError::Inner`].
    pub async fn call<T, E, F, Fut>(&self, op: F) -> Result<T, CircuitError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.try_acquire().map_err(CircuitError::Open)?;

        let guard = PendingCall { breaker: Some(self) };
        let result = op().await;
        guard.settle();

        match result {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(err) => {
                self.record_failure();
                Err(CircuitError::Inner(err))
            }
        }
    }
}

/// Records a failure if the call it guards is abandoned mid-flight.
struct PendingCall<'a> {
    breaker: Option<&'a CircuitBreaker>,
}

impl PendingCall<'_> {
    fn settle(mut self) {
        self.breaker = None;
    }
}

impl Drop for PendingCall<'_> {
    fn drop(&mut self) {
        if let Some(breaker) = self.breaker.take() {
            debug!(circuit = breaker.name, "call dropped before completion, counted as failure");
            breaker.record_failure();
        }
    }
}
