//! Persisted portal session.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use loginator_core::{Error, PortalSession, Result};

use crate::fs::{map_io, map_serde, read_optional, write_atomic};

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    host: String,
    token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logged_in_at: Option<String>,
}

/// The single session record left behind by a successful login.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a session, replacing any previous one.
    #[instrument(skip(self, session), fields(path = %self.path.display(), host = session.host()))]
    pub fn save(&self, session: &PortalSession) -> Result<()> {
        let stored = StoredSession {
            host: session.host().to_string(),
            token: session.token().to_string(),
            logged_in_at: Some(Utc::now().to_rfc3339()),
        };

        let json = serde_json::to_string_pretty(&stored).map_err(map_serde)?;
        write_atomic(&self.path, json.as_bytes())?;

        debug!("Saved session");
        Ok(())
    }

    /// Load the persisted session.
    ///
    /// A missing file, unreadable JSON, or a record lacking either the host
    /// or the token all mean there is no session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionNotFound`] in all of the above cases, and a
    /// storage error only if the file exists but cannot be read.
    pub fn load(&self) -> Result<PortalSession> {
        let Some(json) = read_optional(&self.path)? else {
            return Err(Error::SessionNotFound);
        };

        let stored: StoredSession = match serde_json::from_str(&json) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed session file");
                return Err(Error::SessionNotFound);
            }
        };

        if stored.host.is_empty() || stored.token.is_empty() {
            warn!(path = %self.path.display(), "Ignoring incomplete session file");
            return Err(Error::SessionNotFound);
        }

        Ok(PortalSession::new(stored.host, stored.token))
    }

    /// Remove the stored session. Clearing an absent session is a no-op.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared session");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&self.path, e)),
        }
    }
}
