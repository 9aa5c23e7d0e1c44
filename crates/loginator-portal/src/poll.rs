//! Poll loop.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::{debug, error, info};

use loginator_core::{Error, ProbeResult};

use crate::loginator::{LoginOutcome, Loginator};

/// What one poll cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// No portal detected.
    Online,
    /// A portal was detected and a login attempt ran.
    Login(LoginOutcome),
    /// The probe or login failed before an outcome existed.
    Failed(Error),
}

impl Loginator {
    /// Probe once and log in with stored credentials if a portal shows up.
    pub async fn poll_once(&self) -> CycleOutcome {
        match self.probe().await {
            Ok(ProbeResult::Online) => CycleOutcome::Online,
            Ok(ProbeResult::RedirectTo(url)) => {
                info!(%url, "Captive portal detected");
                match self.login(None, None).await {
                    Ok(outcome) => CycleOutcome::Login(outcome),
                    Err(e) => CycleOutcome::Failed(e),
                }
            }
            Err(e) => {
                error!(error = %e, "Probe failed");
                CycleOutcome::Failed(e)
            }
        }
    }

    /// Poll forever at the configured interval.
    ///
    /// A failing or panicking cycle is logged and the loop carries on; the
    /// only way out is killing the process.
    pub async fn run(&self) -> ! {
        let interval = self.config().poll_interval;
        info!(interval_secs = interval.as_secs(), "Starting poll loop");

        loop {
            match AssertUnwindSafe(self.poll_once()).catch_unwind().await {
                Ok(outcome) => debug!(?outcome, "Poll cycle finished"),
                Err(_) => error!("Poll cycle panicked"),
            }

            tokio::time::sleep(interval).await;
        }
    }
}
