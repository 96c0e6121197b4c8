#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
//! Process bootstrap shared by the Bankline service binaries: command line,
//! layered configuration, logging and shutdown signals.

pub mod cli;
pub mod config;
pub mod duration_serde;
pub mod logging;
pub mod signals;

pub use cli::{CommonArgs, Command};
pub use config::{load_config, render_config};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use signals::{shutdown_token, wait_for_shutdown};
