//! OS secret-service credential store.
//!
//! Passwords live in the platform keyring under one service label. The
//! keyring cannot enumerate entries, so usernames are also kept, in
//! insertion order, in a small JSON index file next to the session.

use std::path::{Path, PathBuf};

use keyring::Entry;
use tracing::{info, instrument, warn};

use loginator_core::error::StorageError;
use loginator_core::{CredentialStore, Credentials, Error, Result};

use crate::fs::{LockFile, map_serde, read_optional, write_atomic};

fn map_keyring(err: keyring::Error) -> Error {
    Error::Storage(StorageError::Keyring {
        message: err.to_string(),
    })
}

/// Credential store backed by the platform keyring.
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
    index_path: PathBuf,
}

impl KeyringCredentialStore {
    pub fn new(service: impl Into<String>, index_path: impl AsRef<Path>) -> Self {
        Self {
            service: service.into(),
            index_path: index_path.as_ref().to_path_buf(),
        }
    }

    fn entry(&self, username: &str) -> Result<Entry> {
        Entry::new(&self.service, username).map_err(map_keyring)
    }

    fn read_index(&self) -> Result<Vec<String>> {
        let Some(json) = read_optional(&self.index_path)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&json) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(path = %self.index_path.display(), error = %e, "Ignoring malformed user index");
                Ok(Vec::new())
            }
        }
    }

    fn write_index(&self, users: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(users).map_err(map_serde)?;
        write_atomic(&self.index_path, json.as_bytes())
    }
}

impl CredentialStore for KeyringCredentialStore {
    #[instrument(skip(self, credentials), fields(service = %self.service, username = credentials.username()))]
    fn store(&self, credentials: &Credentials) -> Result<()> {
        self.entry(credentials.username())?
            .set_password(credentials.password())
            .map_err(map_keyring)?;

        let _lock = LockFile::acquire(&self.index_path)?;
        let mut users = self.read_index()?;
        if !users.iter().any(|u| u == credentials.username()) {
            users.push(credentials.username().to_string());
            self.write_index(&users)?;
        }

        info!("Stored credentials");
        Ok(())
    }

    fn get(&self, username: &str) -> Result<Credentials> {
        match self.entry(username)?.get_password() {
            Ok(password) => Ok(Credentials::new(username, password)),
            Err(keyring::Error::NoEntry) => Err(Error::CredentialsNotFound {
                username: Some(username.to_string()),
            }),
            Err(e) => Err(map_keyring(e)),
        }
    }

    #[instrument(skip(self), fields(service = %self.service))]
    fn delete(&self, username: &str) -> Result<()> {
        let deleted = match self.entry(username)?.delete_password() {
            Ok(()) => true,
            Err(keyring::Error::NoEntry) => false,
            Err(e) => return Err(map_keyring(e)),
        };

        let _lock = LockFile::acquire(&self.index_path)?;
        let mut users = self.read_index()?;
        let before = users.len();
        users.retain(|u| u != username);
        let indexed = users.len() != before;
        if indexed {
            self.write_index(&users)?;
        }

        if !deleted && !indexed {
            return Err(Error::CredentialsNotFound {
                username: Some(username.to_string()),
            });
        }

        info!("Deleted credentials");
        Ok(())
    }

    fn list_users(&self) -> Result<Vec<String>> {
        self.read_index()
    }

    fn get_first(&self) -> Result<Credentials> {
        // Index entries whose secret vanished from the keyring are skipped.
        for username in self.read_index()? {
            match self.get(&username) {
                Ok(credentials) => return Ok(credentials),
                Err(Error::CredentialsNotFound { .. }) => {
                    warn!(%username, "Indexed user has no keyring entry");
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::CredentialsNotFound { username: None })
    }
}
