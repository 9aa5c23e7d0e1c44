//! Authorized portal session.

use std::fmt;

/// The session a portal hands out after a successful login.
///
/// Host and token always travel together: a store that only has one of them
/// has no session at all.
#[derive(Clone, PartialEq, Eq)]
pub struct PortalSession {
    host: String,
    token: String,
}

impl PortalSession {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
        }
    }

    /// Returns the portal host (usually a gateway IP).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the keepalive token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// URL the portal expects to be hit periodically to keep the session.
    pub fn keepalive_url(&self) -> String {
        format!("http://{}/keepalive?{}", self.host, self.token)
    }

    /// URL that terminates the session.
    pub fn logout_url(&self) -> String {
        format!("http://{}/logout?{}", self.host, self.token)
    }
}

// Hide token value in Debug output
impl fmt::Debug for PortalSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalSession")
            .field("host", &self.host)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_urls() {
        let session = PortalSession::new("10.0.0.1", "abc123");
        assert_eq!(session.keepalive_url(), "http://10.0.0.1/keepalive?abc123");
        assert_eq!(session.logout_url(), "http://10.0.0.1/logout?abc123");
    }

    #[test]
    fn session_hides_token_in_debug() {
        let session = PortalSession::new("10.0.0.1", "abc123");
        let debug = format!("{:?}", session);
        assert!(debug.contains("10.0.0.1"));
        assert!(!debug.contains("abc123"));
    }
}
