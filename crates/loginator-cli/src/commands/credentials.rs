//! Credentials command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use loginator_core::{Credentials, Error};

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct CredentialsCommand {
    #[command(subcommand)]
    pub command: CredentialsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CredentialsSubcommand {
    /// Store a username and password
    Add(AddArgs),

    /// Forget a stored user
    Delete(DeleteArgs),

    /// List stored usernames
    List,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Portal username (prompted if omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Portal password (prompted if omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Username to forget
    pub username: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub fn handle(global: &GlobalArgs, cmd: CredentialsCommand) -> Result<()> {
    match cmd.command {
        CredentialsSubcommand::Add(args) => add(global, args),
        CredentialsSubcommand::Delete(args) => delete(global, args),
        CredentialsSubcommand::List => list(global),
    }
}

fn add(global: &GlobalArgs, args: AddArgs) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    if username.is_empty() {
        bail!("Username must not be empty");
    }

    let password = match args.password {
        Some(password) => password,
        None => prompt_new_password()?,
    };

    let store = global.credential_store()?;
    store
        .store(&Credentials::new(&username, password))
        .context("Failed to store credentials")?;

    output::success(&format!("Stored credentials for {}", username));
    Ok(())
}

fn delete(global: &GlobalArgs, args: DeleteArgs) -> Result<()> {
    let store = global.credential_store()?;

    if !args.force {
        eprint!("This will forget the password for {}. Continue? [y/N] ", args.username);
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    match store.delete(&args.username) {
        Ok(()) => {
            output::success(&format!("Deleted credentials for {}", args.username));
            Ok(())
        }
        Err(Error::CredentialsNotFound { .. }) => {
            bail!("No credentials stored for {}", args.username)
        }
        Err(e) => Err(e).context("Failed to delete credentials"),
    }
}

fn list(global: &GlobalArgs) -> Result<()> {
    let users = global
        .credential_store()?
        .list_users()
        .context("Failed to list credentials")?;

    if users.is_empty() {
        output::notice("No stored credentials. Run 'loginator credentials add'.");
    }
    for user in users {
        println!("{}", user);
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_new_password() -> Result<String> {
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let confirm =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;

    if password != confirm {
        bail!("Passwords do not match");
    }
    Ok(password)
}
