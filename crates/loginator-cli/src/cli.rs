//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use loginator_core::config::DEFAULT_PROBE_URL;

use crate::commands::{credentials, get, login, logout, run, service};

/// Captive-portal auto-login.
#[derive(Parser, Debug)]
#[command(name = "loginator")]
#[command(author, version = env!("LOGINATOR_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Keep credentials in a plain JSON file instead of the OS keyring
    #[arg(long, global = true, env = "LOGINATOR_PLAIN_STORE")]
    pub plain_store: bool,

    /// Connectivity-check endpoint
    #[arg(long, global = true, env = "LOGINATOR_PROBE_URL", default_value = DEFAULT_PROBE_URL)]
    pub probe_url: String,

    /// Seconds between portal checks in `run`
    #[arg(long, global = true, env = "LOGINATOR_INTERVAL", default_value_t = 60)]
    pub interval: u64,

    /// Session file location
    #[arg(long, global = true, env = "LOGINATOR_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Plain credentials file location (with --plain-store)
    #[arg(long, global = true, env = "LOGINATOR_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Do not suspend Cloudflare WARP around logins
    #[arg(long, global = true, env = "LOGINATOR_NO_ISOLATION")]
    pub no_isolation: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch for the captive portal and log in whenever it appears
    Run(run::RunArgs),

    /// Log in to the captive portal once
    Login(login::LoginArgs),

    /// Log out of the captive portal
    Logout(logout::LogoutArgs),

    /// Show details of the current session
    Get(get::GetCommand),

    /// Manage stored credentials
    Credentials(credentials::CredentialsCommand),

    /// Manage the background systemd user service
    Service(service::ServiceCommand),
}
