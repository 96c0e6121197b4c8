//! `customers-server` binary.

use anyhow::Context;
use bankline_bootstrap::{Command, CommonArgs, init_logging, load_config, render_config, shutdown_token};
use clap::Parser;
use tokio::net::TcpListener;

use customers::config::ENV_PREFIX;
use customers::{CustomersConfig, build_service, serve};

/// Bankline customers service
#[derive(Parser)]
#[command(name = "customers-server")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Accounts service URI override (overrides config)
    #[arg(long)]
    accounts_uri: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: CustomersConfig = load_config(cli.common.config.as_deref(), ENV_PREFIX)?;
    if let Some(listen) = cli.common.listen {
        config.listen_addr = listen;
    }
    if let Some(uri) = cli.accounts_uri {
        config.accounts.uri = uri;
    }

    if cli.common.print_config {
        println!("{}", render_config(&config)?);
        return Ok(());
    }

    init_logging(&config.logging, cli.common.verbose)?;

    let service = build_service(&config)?;
    if cli.command == Some(Command::Check) {
        tracing::info!("configuration is valid");
        return Ok(());
    }

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    serve(listener, service, shutdown_token()).await
}
