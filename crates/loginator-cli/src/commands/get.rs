//! Get command implementation.
//!
//! Prints single values of the stored session so scripts can use them.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use serde::Serialize;

use loginator_core::{Error, PortalSession};

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GetCommand {
    #[command(subcommand)]
    pub command: GetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GetSubcommand {
    /// Session token
    Token,

    /// Portal host
    Ip,

    /// URL that keeps the session alive
    KeepaliveUrl,

    /// URL that ends the session
    LogoutUrl,

    /// The whole session as JSON
    Session,
}

#[derive(Serialize)]
struct SessionView<'a> {
    host: &'a str,
    token: &'a str,
    keepalive_url: String,
    logout_url: String,
}

pub fn handle(global: &GlobalArgs, cmd: GetCommand) -> Result<()> {
    let session = match global.session_store()?.load() {
        Ok(session) => session,
        Err(Error::SessionNotFound) => bail!("No active session. Run 'loginator login' first."),
        Err(e) => return Err(e.into()),
    };

    match cmd.command {
        GetSubcommand::Token => println!("{}", session.token()),
        GetSubcommand::Ip => println!("{}", session.host()),
        GetSubcommand::KeepaliveUrl => println!("{}", session.keepalive_url()),
        GetSubcommand::LogoutUrl => println!("{}", session.logout_url()),
        GetSubcommand::Session => output::json_pretty(&view(&session))?,
    }

    Ok(())
}

fn view(session: &PortalSession) -> SessionView<'_> {
    SessionView {
        host: session.host(),
        token: session.token(),
        keepalive_url: session.keepalive_url(),
        logout_url: session.logout_url(),
    }
}
