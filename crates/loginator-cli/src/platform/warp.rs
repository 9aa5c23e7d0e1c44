//! Cloudflare WARP as the network isolation tool.
//!
//! WARP tunnels all traffic, which hides the captive portal. It has to be
//! down while the login form is fetched and submitted.

use tracing::{debug, info};

use loginator_core::{NetworkIsolation, Result};

use super::shell;

const WARP_CLI: &str = "warp-cli";

/// Toggles WARP through `warp-cli`. Each call blocks until `warp-cli`
/// exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarpIsolation;

impl NetworkIsolation for WarpIsolation {
    fn name(&self) -> &str {
        "warp"
    }

    fn is_connected(&self) -> bool {
        match shell::run(WARP_CLI, &["status"]) {
            Ok(out) => {
                let connected = status_is_connected(&out);
                info!(connected, "WARP status");
                connected
            }
            Err(e) => {
                debug!(error = %e, "warp-cli is not available");
                false
            }
        }
    }

    fn disconnect(&self) -> Result<()> {
        info!("Disconnecting WARP");
        shell::run(WARP_CLI, &["disconnect"]).map(|_| ())
    }

    fn connect(&self) -> Result<()> {
        info!("Connecting WARP");
        shell::run(WARP_CLI, &["connect"]).map(|_| ())
    }
}

fn status_is_connected(status: &str) -> bool {
    status.contains("Connected") || status.contains("Connecting")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_warp_status() {
        assert!(status_is_connected("Status update: Connected"));
        assert!(status_is_connected("Status update: Connecting\nReason: ..."));
        assert!(!status_is_connected("Status update: Disconnected"));
    }
}
