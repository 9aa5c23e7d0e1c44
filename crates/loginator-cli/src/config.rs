//! Resolves global options into stores and a configured loginator.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use loginator_core::config::SERVICE_NAME;
use loginator_core::{CredentialStore, NetworkIsolation, NoIsolation, PortalConfig};
use loginator_portal::Loginator;
use loginator_store::{KeyringCredentialStore, PlainCredentialStore, SessionStore};

use crate::cli::GlobalArgs;
use crate::platform::warp::WarpIsolation;

/// Get the per-user data directory, creating it if needed.
fn data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", SERVICE_NAME)
        .context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.to_path_buf())
}

impl GlobalArgs {
    pub fn session_store(&self) -> Result<SessionStore> {
        let path = match &self.session_file {
            Some(path) => path.clone(),
            None => data_dir()?.join("session.json"),
        };
        Ok(SessionStore::new(path))
    }

    /// The credential backend, chosen once from `--plain-store`.
    pub fn credential_store(&self) -> Result<Box<dyn CredentialStore>> {
        if self.plain_store {
            let path = match &self.credentials_file {
                Some(path) => path.clone(),
                None => data_dir()?.join("credentials.json"),
            };
            Ok(Box::new(PlainCredentialStore::new(path)))
        } else {
            let index = data_dir()?.join("users.json");
            Ok(Box::new(KeyringCredentialStore::new(SERVICE_NAME, index)))
        }
    }

    pub fn isolation(&self) -> Box<dyn NetworkIsolation> {
        if self.no_isolation {
            Box::new(NoIsolation)
        } else {
            Box::new(WarpIsolation)
        }
    }

    pub fn portal_config(&self) -> Result<PortalConfig> {
        let mut config =
            PortalConfig::with_probe_url(&self.probe_url).context("Invalid probe URL")?;
        config.poll_interval = Duration::from_secs(self.interval);
        Ok(config)
    }

    pub fn loginator(&self) -> Result<Loginator> {
        let loginator = Loginator::new(
            self.portal_config()?,
            self.credential_store()?,
            self.session_store()?,
        )
        .context("Failed to create portal client")?;

        Ok(loginator.with_isolation(self.isolation()))
    }

    /// Global flags worth carrying into the systemd unit's command line.
    pub fn service_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.plain_store {
            args.push("--plain-store".to_string());
        }
        if self.no_isolation {
            args.push("--no-isolation".to_string());
        }
        if let Some(path) = &self.credentials_file {
            args.push("--credentials-file".to_string());
            args.push(path.display().to_string());
        }
        if let Some(path) = &self.session_file {
            args.push("--session-file".to_string());
            args.push(path.display().to_string());
        }
        args
    }
}
