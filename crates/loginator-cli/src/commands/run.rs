//! Run command implementation.

use anyhow::{Result, bail};
use clap::Args;
use tracing::info;

use loginator_core::config::SERVICE_NAME;

use crate::cli::GlobalArgs;
use crate::platform::systemd::ServiceManager;

#[derive(Args, Debug)]
pub struct RunArgs {}

pub async fn run(global: &GlobalArgs, _args: RunArgs) -> Result<()> {
    if !ServiceManager::invoked_by_systemd() {
        let service = ServiceManager::new(SERVICE_NAME, global.service_args())?;
        if service.is_active() {
            bail!(
                "The {} service is already running.\n\
                 Stop it with 'loginator service stop' to run in the foreground.",
                SERVICE_NAME
            );
        }
    }

    let loginator = global.loginator()?;
    info!(
        interval = loginator.config().poll_interval.as_secs(),
        probe = %loginator.config().probe_url,
        "Watching for captive portal"
    );

    loginator.run().await
}
