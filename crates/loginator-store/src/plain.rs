//! Plain-file credential store.
//!
//! For hosts without a secret service (headless boxes, Android/Termux).
//! Passwords are kept in clear text in an owner-only JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use loginator_core::{CredentialStore, Credentials, Error, Result};

use crate::fs::{LockFile, map_serde, read_optional, write_atomic};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredential {
    username: String,
    password: String,
}

/// Credential store backed by a JSON file, in insertion order.
#[derive(Debug, Clone)]
pub struct PlainCredentialStore {
    path: PathBuf,
}

impl PlainCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<StoredCredential>> {
        let Some(json) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&json) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed credentials file");
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, entries: &[StoredCredential]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries).map_err(map_serde)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

impl CredentialStore for PlainCredentialStore {
    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    fn store(&self, credentials: &Credentials) -> Result<()> {
        let _lock = LockFile::acquire(&self.path)?;
        let mut entries = self.read_all()?;

        let password = credentials.password().to_string();
        match entries
            .iter_mut()
            .find(|e| e.username == credentials.username())
        {
            Some(entry) => entry.password = password,
            None => entries.push(StoredCredential {
                username: credentials.username().to_string(),
                password,
            }),
        }

        self.write_all(&entries)?;
        info!("Stored credentials");
        Ok(())
    }

    fn get(&self, username: &str) -> Result<Credentials> {
        self.read_all()?
            .into_iter()
            .find(|e| e.username == username)
            .map(|e| Credentials::new(e.username, e.password))
            .ok_or_else(|| Error::CredentialsNotFound {
                username: Some(username.to_string()),
            })
    }

    #[instrument(skip(self))]
    fn delete(&self, username: &str) -> Result<()> {
        let _lock = LockFile::acquire(&self.path)?;
        let mut entries = self.read_all()?;

        let before = entries.len();
        entries.retain(|e| e.username != username);
        if entries.len() == before {
            return Err(Error::CredentialsNotFound {
                username: Some(username.to_string()),
            });
        }

        self.write_all(&entries)?;
        info!("Deleted credentials");
        Ok(())
    }

    fn list_users(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_iter().map(|e| e.username).collect())
    }
}
