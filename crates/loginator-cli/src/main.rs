//! loginator - keeps this machine logged in to a captive portal.
//!
//! This is a thin wrapper over `loginator-portal`: it wires the configured
//! stores and VPN tool into a [`Loginator`](loginator_portal::Loginator) and
//! exposes the session and the systemd service on the command line.

mod cli;
mod commands;
mod config;
mod output;
mod platform;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{credentials, get, login, logout, run, service};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let global = cli.global;
    match cli.command {
        Commands::Run(args) => run::run(&global, args).await,
        Commands::Login(args) => login::run(&global, args).await,
        Commands::Logout(args) => logout::run(&global, args).await,
        Commands::Get(cmd) => get::handle(&global, cmd),
        Commands::Credentials(cmd) => credentials::handle(&global, cmd),
        Commands::Service(cmd) => service::handle(&global, cmd),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
