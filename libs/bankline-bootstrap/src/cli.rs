use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Flags every service binary accepts; flatten into the binary's parser.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address override (overrides config)
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}
