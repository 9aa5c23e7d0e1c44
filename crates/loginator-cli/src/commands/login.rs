//! Login command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use loginator_core::Error;
use loginator_portal::LoginOutcome;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Portal username (defaults to the first stored user)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Portal password (defaults to the stored password)
    #[arg(short, long, requires = "username")]
    pub password: Option<String>,
}

pub async fn run(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let loginator = global.loginator()?;

    eprintln!("{}", "Checking for captive portal...".dimmed());

    let outcome = loginator
        .login(args.username.as_deref(), args.password.as_deref())
        .await?;

    match outcome {
        LoginOutcome::Online => output::success("Already online, no captive portal"),
        LoginOutcome::NotConfigured => output::notice(
            "No stored credentials, nothing to do. Run 'loginator credentials add' first.",
        ),
        LoginOutcome::LoggedIn(session) => {
            output::success("Logged in successfully");
            println!();
            output::field("Portal", session.host());
            output::field("Keepalive", &session.keepalive_url());
        }
        LoginOutcome::Aborted(Error::Authentication { username }) => {
            bail!("Authentication failed for '{}'. Check the stored credentials.", username)
        }
        LoginOutcome::Aborted(Error::Network(e)) => {
            bail!("Captive portal unreachable: {}", e)
        }
        LoginOutcome::Aborted(e) => bail!("Login failed: {}", e),
    }

    Ok(())
}
