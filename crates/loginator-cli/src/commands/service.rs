//! Service command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};

use loginator_core::config::SERVICE_NAME;

use crate::cli::GlobalArgs;
use crate::output;
use crate::platform::systemd::ServiceManager;

#[derive(Args, Debug)]
pub struct ServiceCommand {
    #[command(subcommand)]
    pub command: ServiceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServiceSubcommand {
    /// Start the service on login
    Enable,

    /// Stop starting the service on login
    Disable,

    /// Start the service now
    Start,

    /// Stop the service
    Stop,

    /// Restart the service
    Restart,

    /// Show whether the service is running
    Status,

    /// Write the unit file, then enable and start the service
    Setup,
}

pub fn handle(global: &GlobalArgs, cmd: ServiceCommand) -> Result<()> {
    let service = ServiceManager::new(SERVICE_NAME, global.service_args())?;

    match cmd.command {
        ServiceSubcommand::Enable => enable(&service)?,
        ServiceSubcommand::Disable => {
            if service.disable()? {
                output::success("Service disabled");
            } else {
                output::notice("Service was already disabled");
            }
        }
        ServiceSubcommand::Start => {
            service.start()?;
            output::success("Service started");
        }
        ServiceSubcommand::Stop => {
            service.stop()?;
            output::success("Service stopped");
        }
        ServiceSubcommand::Restart => {
            service.restart()?;
            output::success("Service restarted");
        }
        ServiceSubcommand::Status => {
            let state = if service.is_active() { "active" } else { "inactive" };
            output::field("Service", state);
            output::field("Unit", &service.unit_path().display().to_string());
        }
        ServiceSubcommand::Setup => setup(&service)?,
    }

    Ok(())
}

fn enable(service: &ServiceManager) -> Result<()> {
    if service.enable()? {
        output::success("Service enabled");
    } else {
        output::notice("Service was already enabled");
    }
    Ok(())
}

/// Replace any existing unit with a fresh one and bring it up.
fn setup(service: &ServiceManager) -> Result<()> {
    if service.is_active() {
        service.stop()?;
    }
    // Disabling an absent unit fails; the unit is rewritten right after.
    let _ = service.disable();

    service.create()?;
    enable(service)?;
    service.start()?;

    output::success("Service set up and running");
    output::field("Unit", &service.unit_path().display().to_string());
    Ok(())
}
