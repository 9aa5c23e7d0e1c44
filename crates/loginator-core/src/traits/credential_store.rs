//! Credential store trait.

use crate::{Credentials, Error, Result};

/// A place portal credentials are kept between runs.
///
/// Implementations must enumerate users in a stable order: the first
/// enumerated user is the one an unattended login picks.
pub trait CredentialStore: Send + Sync {
    /// Store credentials, replacing any password already kept for the user.
    fn store(&self, credentials: &Credentials) -> Result<()>;

    /// Look up the credentials for a user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotFound`] if the user is unknown.
    fn get(&self, username: &str) -> Result<Credentials>;

    /// Remove the credentials for a user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotFound`] if the user is unknown.
    fn delete(&self, username: &str) -> Result<()>;

    /// List stored usernames in store order.
    fn list_users(&self) -> Result<Vec<String>>;

    /// Returns the first stored credentials.
    fn get_first(&self) -> Result<Credentials> {
        let username = self
            .list_users()?
            .into_iter()
            .next()
            .ok_or(Error::CredentialsNotFound { username: None })?;
        self.get(&username)
    }
}
