//! Connectivity probe outcome.

use std::fmt;

/// What the connectivity check saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The probe endpoint answered 204; nothing intercepts traffic.
    Online,
    /// A captive portal answered with a JavaScript redirect to this URL.
    RedirectTo(String),
}

impl ProbeResult {
    /// Returns the portal redirect target, if any.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            ProbeResult::Online => None,
            ProbeResult::RedirectTo(url) => Some(url),
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ProbeResult::Online)
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeResult::Online => write!(f, "online"),
            ProbeResult::RedirectTo(url) => write!(f, "captive portal at {}", url),
        }
    }
}
