//! Runtime configuration for the portal client and poll loop.

use std::time::Duration;

use crate::Result;
use crate::types::PortalUrl;

/// Well-known endpoint that answers 204 when nothing intercepts traffic.
pub const DEFAULT_PROBE_URL: &str = "http://clients3.google.com/generate_204";

/// Per-request timeout for every HTTP call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay between poll loop cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Label used for the keyring service and the systemd unit.
pub const SERVICE_NAME: &str = "loginator";

/// Portal client configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Connectivity-check endpoint.
    pub probe_url: PortalUrl,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// Sleep between poll cycles.
    pub poll_interval: Duration,
}

impl PortalConfig {
    /// Configuration with a custom probe endpoint and default timings.
    pub fn with_probe_url(probe_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            probe_url: PortalUrl::new(probe_url)?,
            ..Self::default()
        })
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            probe_url: PortalUrl::new(DEFAULT_PROBE_URL)
                .unwrap_or_else(|_| unreachable!("default probe URL is valid")),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.probe_url.as_str(), DEFAULT_PROBE_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn custom_probe_url() {
        let config = PortalConfig::with_probe_url("http://127.0.0.1:8080/generate_204").unwrap();
        assert_eq!(config.probe_url.host(), Some("127.0.0.1"));
        assert!(PortalConfig::with_probe_url("not a url").is_err());
    }
}
