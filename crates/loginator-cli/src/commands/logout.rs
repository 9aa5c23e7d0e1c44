//! Logout command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use loginator_core::Error;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(global: &GlobalArgs, _args: LogoutArgs) -> Result<()> {
    let loginator = global.loginator()?;

    match loginator.logout().await {
        Ok(session) => {
            output::success(&format!("Logged out of {}", session.host()));
            Ok(())
        }
        Err(Error::SessionNotFound) => bail!("No active session. Run 'loginator login' first."),
        Err(e) => Err(e).context("Failed to log out"),
    }
}
