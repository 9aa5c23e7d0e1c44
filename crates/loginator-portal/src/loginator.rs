//! Login orchestration.

use std::fmt;

use tracing::{error, info, instrument, warn};

use loginator_core::types::PortalUrl;
use loginator_core::{
    CredentialStore, Credentials, Error, IsolationGuard, NetworkIsolation, NoIsolation,
    PortalConfig, PortalSession, ProbeResult, Result,
};
use loginator_store::SessionStore;

use crate::client::PortalClient;
use crate::form::extract_form;
use crate::keepalive::extract_session;
use crate::probe::probe;
use crate::submit::submit;

/// How a login attempt ended.
#[derive(Debug)]
pub enum LoginOutcome {
    /// No captive portal intercepted the probe; nothing to do.
    Online,
    /// No credentials are stored yet; no request was made.
    NotConfigured,
    /// Logged in and persisted the new session.
    LoggedIn(PortalSession),
    /// The attempt was abandoned; the error says why.
    Aborted(Error),
}

impl LoginOutcome {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, LoginOutcome::LoggedIn(_))
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginOutcome::Online => write!(f, "already online, no captive portal"),
            LoginOutcome::NotConfigured => write!(f, "no stored credentials"),
            LoginOutcome::LoggedIn(session) => write!(f, "logged in via {}", session.host()),
            LoginOutcome::Aborted(e) => write!(f, "login aborted: {}", e),
        }
    }
}

/// Runs login attempts against the captive portal.
pub struct Loginator {
    config: PortalConfig,
    client: PortalClient,
    credentials: Box<dyn CredentialStore>,
    sessions: SessionStore,
    isolation: Box<dyn NetworkIsolation>,
}

impl Loginator {
    /// Create a loginator with no network isolation tool.
    pub fn new(
        config: PortalConfig,
        credentials: Box<dyn CredentialStore>,
        sessions: SessionStore,
    ) -> Result<Self> {
        let client = PortalClient::new(config.timeout)?;
        Ok(Self {
            config,
            client,
            credentials,
            sessions,
            isolation: Box::new(NoIsolation),
        })
    }

    /// Suspend this tool around each login attempt.
    pub fn with_isolation(mut self, isolation: Box<dyn NetworkIsolation>) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Check whether a captive portal intercepts traffic.
    pub async fn probe(&self) -> Result<ProbeResult> {
        probe(&self.client, self.config.probe_url.as_str()).await
    }

    /// Work out which credentials a login should use.
    ///
    /// Explicit username and password win; a username alone is looked up in
    /// the store; with neither, the first stored user is used.
    pub fn resolve_credentials(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Credentials> {
        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
            (Some(username), None) => self.credentials.get(username),
            (None, None) => self.credentials.get_first(),
            (None, Some(_)) => Err(Error::Usage(
                "username must be provided if password is given".to_string(),
            )),
        }
    }

    /// Run one login attempt.
    ///
    /// Only caller misuse is returned as `Err`; every protocol failure ends
    /// the attempt with [`LoginOutcome::Aborted`] after being logged.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<LoginOutcome> {
        let credentials = match self.resolve_credentials(username, password) {
            Ok(credentials) => credentials,
            Err(e @ Error::Usage(_)) => return Err(e),
            Err(e) if e.is_not_configured() => {
                info!(error = %e, "Skipping login, no credentials configured");
                return Ok(LoginOutcome::NotConfigured);
            }
            Err(e) => {
                error!(error = %e, "Failed to read stored credentials");
                return Ok(LoginOutcome::Aborted(e));
            }
        };

        let portal_url = match self.probe().await {
            Ok(ProbeResult::Online) => return Ok(LoginOutcome::Online),
            Ok(ProbeResult::RedirectTo(url)) => url,
            Err(e) => {
                report(&e);
                return Ok(LoginOutcome::Aborted(e));
            }
        };

        let result = {
            let _guard = IsolationGuard::acquire(self.isolation.as_ref());
            self.attempt(&portal_url, &credentials).await
        };

        match result {
            Ok(session) => {
                info!(host = session.host(), "Logged in to captive portal");
                Ok(LoginOutcome::LoggedIn(session))
            }
            Err(e) => {
                report(&e);
                Ok(LoginOutcome::Aborted(e))
            }
        }
    }

    /// Fetch the login page, submit the form and persist the session.
    async fn attempt(&self, portal_url: &str, credentials: &Credentials) -> Result<PortalSession> {
        let page = self.client.get(portal_url).await?;
        let page_url = PortalUrl::new(&page.url)?;

        let form = extract_form(&page.body)?;
        let body = submit(&self.client, &page_url, &form, credentials).await?;

        let session = extract_session(&body)?;
        self.sessions.save(&session)?;

        Ok(session)
    }

    /// Terminate the stored session at the portal and forget it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionNotFound`] if there is nothing to log out of.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<PortalSession> {
        let session = self.sessions.load()?;
        let url = session.logout_url();
        info!(host = session.host(), "Logging out");

        let response = self.client.get(&url).await?;
        if !(200..400).contains(&response.status) {
            warn!(status = response.status, "Portal answered logout with an error status");
        }

        self.sessions.clear()?;
        Ok(session)
    }
}

fn report(err: &Error) {
    match err {
        Error::Authentication { username } => {
            error!(%username, "Authentication failed, check the stored credentials")
        }
        Error::Network(e) => error!(error = %e, "Captive portal unreachable"),
        Error::Parse(e) => error!(error = %e, "Captive portal page has an unexpected shape"),
        other => error!(error = %other, "Login attempt failed"),
    }
}

impl fmt::Debug for Loginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loginator")
            .field("config", &self.config)
            .field("sessions", &self.sessions)
            .field("isolation", &self.isolation.name())
            .finish_non_exhaustive()
    }
}
