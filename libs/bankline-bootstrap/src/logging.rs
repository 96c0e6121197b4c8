//! Structured logging setup.
//!
//! The active filter is chosen in this order: `RUST_LOG`, the `-v` count,
//! then `logging.level` from the configuration.

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `info,customers=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Pick the filter directive; `rust_log` is the raw `RUST_LOG` value.
#[must_use]
pub fn filter_directive(cfg: &LoggingConfig, verbose: u8, rust_log: Option<&str>) -> String {
    if let Some(env) = rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        return env.to_owned();
    }
    verbosity_directive(verbose).map_or_else(|| cfg.level.clone(), str::to_owned)
}

/// Install the global subscriber.
///
/// # Errors
/// Fails if the directive does not parse or a global subscriber is already set.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(cfg, verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive)?;

    let fmt_layer = match cfg.format {
        LogFormat::Text => tracing_subscriber::fmt::layer().with_target(true).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry().with(fmt_layer).with(filter).try_init()?;

    tracing::debug!(filter = %directive, format = ?cfg.format, "logging initialized");
    Ok(())
}
