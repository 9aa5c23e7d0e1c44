//! Network isolation (VPN) toggling around a login attempt.

use tracing::{error, info, warn};

use crate::Result;

/// A tool that tunnels traffic away from the local network, hiding the
/// captive portal while it is connected.
///
/// # Blocking
///
/// Every method may block the calling thread while an external tool runs.
/// [`IsolationGuard`] calls them synchronously, including from `Drop`, so
/// async callers hold the guard on a runtime that can afford a stalled
/// worker (the CLI uses a current-thread runtime with nothing else
/// scheduled during a login attempt).
pub trait NetworkIsolation: Send + Sync {
    /// Human-readable tool name for logs.
    fn name(&self) -> &str;

    /// Returns true if the tunnel is up (or coming up).
    fn is_connected(&self) -> bool;

    /// Bring the tunnel down.
    fn disconnect(&self) -> Result<()>;

    /// Bring the tunnel up.
    fn connect(&self) -> Result<()>;
}

/// Isolation for hosts without any tunnel tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIsolation;

impl NetworkIsolation for NoIsolation {
    fn name(&self) -> &str {
        "none"
    }

    fn is_connected(&self) -> bool {
        false
    }

    fn disconnect(&self) -> Result<()> {
        Ok(())
    }

    fn connect(&self) -> Result<()> {
        Ok(())
    }
}

/// Exclusive use of the local network path for the lifetime of the guard.
///
/// Acquiring the guard disconnects the tunnel if it was up; dropping it
/// reconnects the tunnel on every exit path, including early returns and
/// unwinding.
#[must_use = "the tunnel is restored as soon as the guard is dropped"]
pub struct IsolationGuard<'a> {
    isolation: &'a dyn NetworkIsolation,
    was_connected: bool,
}

impl<'a> IsolationGuard<'a> {
    pub fn acquire(isolation: &'a dyn NetworkIsolation) -> Self {
        let was_connected = isolation.is_connected();
        info!(tool = isolation.name(), was_connected, "Suspending network isolation");

        if was_connected && let Err(e) = isolation.disconnect() {
            warn!(tool = isolation.name(), error = %e, "Failed to disconnect");
        }

        Self {
            isolation,
            was_connected,
        }
    }

    /// Returns true if the tunnel was up when the guard was acquired.
    pub fn was_connected(&self) -> bool {
        self.was_connected
    }
}

impl Drop for IsolationGuard<'_> {
    fn drop(&mut self) {
        info!(
            tool = self.isolation.name(),
            connected = self.was_connected,
            "Restoring network isolation"
        );
        if self.was_connected && let Err(e) = self.isolation.connect() {
            error!(tool = self.isolation.name(), error = %e, "Failed to reconnect");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        connected: Mutex<bool>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl Recorder {
        fn connected() -> Self {
            Self {
                connected: Mutex::new(true),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl NetworkIsolation for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn is_connected(&self) -> bool {
            *self.connected.lock().unwrap()
        }

        fn disconnect(&self) -> Result<()> {
            self.calls.lock().unwrap().push("disconnect");
            *self.connected.lock().unwrap() = false;
            Ok(())
        }

        fn connect(&self) -> Result<()> {
            self.calls.lock().unwrap().push("connect");
            *self.connected.lock().unwrap() = true;
            Ok(())
        }
    }

    #[test]
    fn restores_connected_tunnel_on_drop() {
        let tool = Recorder::connected();
        {
            let guard = IsolationGuard::acquire(&tool);
            assert!(guard.was_connected());
            assert!(!tool.is_connected());
        }
        assert!(tool.is_connected());
        assert_eq!(*tool.calls.lock().unwrap(), vec!["disconnect", "connect"]);
    }

    #[test]
    fn leaves_disconnected_tunnel_alone() {
        let tool = Recorder::default();
        drop(IsolationGuard::acquire(&tool));
        assert!(!tool.is_connected());
        assert!(tool.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn restores_on_early_error_return() {
        fn attempt(tool: &dyn NetworkIsolation) -> std::result::Result<(), &'static str> {
            let _guard = IsolationGuard::acquire(tool);
            Err("portal unreachable")
        }

        let tool = Recorder::connected();
        assert!(attempt(&tool).is_err());
        assert!(tool.is_connected());
    }
}
