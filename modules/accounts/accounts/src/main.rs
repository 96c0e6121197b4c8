//! `accounts-server` binary.

use anyhow::Context;
use bankline_bootstrap::{Command, CommonArgs, init_logging, load_config, render_config, shutdown_token};
use clap::Parser;
use tokio::net::TcpListener;

use accounts::config::ENV_PREFIX;
use accounts::{AccountsConfig, build_service, serve};

/// Bankline accounts service
#[derive(Parser)]
#[command(name = "accounts-server")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: AccountsConfig = load_config(cli.common.config.as_deref(), ENV_PREFIX)?;
    if let Some(listen) = cli.common.listen {
        config.listen_addr = listen;
    }

    if cli.common.print_config {
        println!("{}", render_config(&config)?);
        return Ok(());
    }

    init_logging(&config.logging, cli.common.verbose)?;

    if cli.command == Some(Command::Check) {
        tracing::info!("configuration is valid");
        return Ok(());
    }

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    serve(listener, build_service(&config), shutdown_token()).await
}
