//! systemd user service management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use tracing::info;

use super::shell;

const SYSTEMCTL: &str = "systemctl";

/// Manages `~/.config/systemd/user/<name>.service`.
#[derive(Debug, Clone)]
pub struct ServiceManager {
    name: String,
    unit_dir: PathBuf,
    home: PathBuf,
    exe: PathBuf,
    args: Vec<String>,
}

impl ServiceManager {
    /// Manager for the unit `name`, running the current executable with
    /// `args` placed before the `run` subcommand.
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Result<Self> {
        let base = BaseDirs::new().context("Could not determine home directory")?;
        let exe = std::env::current_exe().context("Could not locate the loginator executable")?;

        Ok(Self {
            name: name.into(),
            unit_dir: base.config_dir().join("systemd").join("user"),
            home: base.home_dir().to_path_buf(),
            exe,
            args,
        })
    }

    pub fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}.service", self.name))
    }

    /// Returns true when this process was started by systemd.
    pub fn invoked_by_systemd() -> bool {
        std::env::var_os("INVOCATION_ID").is_some()
    }

    pub fn unit_contents(&self) -> String {
        let mut exec = vec![quote(&self.exe)];
        exec.extend(self.args.iter().map(|a| quote(Path::new(a))));
        exec.push("-v".to_string());
        exec.push("run".to_string());

        format!(
            "[Unit]\n\
             Description=Captive portal auto-login\n\
             After=default.target\n\
             \n\
             [Service]\n\
             Type=simple\n\
             ExecStart={}\n\
             Restart=on-failure\n\
             RestartSec=5\n\
             WorkingDirectory={}\n\
             \n\
             [Install]\n\
             WantedBy=default.target\n",
            exec.join(" "),
            self.home.display()
        )
    }

    /// Write the unit file.
    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.unit_dir).context("Failed to create systemd user directory")?;

        let path = self.unit_path();
        fs::write(&path, self.unit_contents()).context("Failed to write unit file")?;

        info!(path = %path.display(), "Service file created");
        Ok(())
    }

    /// Enable the unit. Returns false if it was already enabled.
    pub fn enable(&self) -> Result<bool> {
        shell::run(SYSTEMCTL, &["--user", "daemon-reload"])?;
        let out = shell::run_capture_all(SYSTEMCTL, &["--user", "enable", &self.name])
            .with_context(|| format!("Failed to enable {}. It may not be created.", self.name))?;
        // systemctl reports created symlinks on stderr and is silent otherwise.
        Ok(!out.stderr.is_empty())
    }

    /// Disable the unit. Returns false if it was already disabled.
    pub fn disable(&self) -> Result<bool> {
        let out = shell::run_capture_all(SYSTEMCTL, &["--user", "disable", &self.name])
            .with_context(|| format!("Failed to disable {}. It may not be enabled.", self.name))?;
        Ok(!out.stderr.is_empty())
    }

    pub fn start(&self) -> Result<()> {
        self.systemctl("start")
            .with_context(|| format!("Failed to start {}. It may not be created.", self.name))
    }

    pub fn stop(&self) -> Result<()> {
        self.systemctl("stop")
            .with_context(|| format!("Failed to stop {}. It may not be running.", self.name))
    }

    pub fn restart(&self) -> Result<()> {
        self.systemctl("restart")
            .with_context(|| format!("Failed to restart {}.", self.name))
    }

    pub fn is_active(&self) -> bool {
        shell::run(SYSTEMCTL, &["--user", "is-active", "--quiet", &self.name]).is_ok()
    }

    fn systemctl(&self, action: &str) -> loginator_core::Result<()> {
        shell::run(SYSTEMCTL, &["--user", action, &self.name]).map(|_| ())
    }
}

/// Quote a path for an `ExecStart=` line if it contains spaces.
fn quote(path: &Path) -> String {
    let s = path.display().to_string();
    if s.contains(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(args: Vec<String>) -> ServiceManager {
        ServiceManager {
            name: "loginator".to_string(),
            unit_dir: PathBuf::from("/home/alice/.config/systemd/user"),
            home: PathBuf::from("/home/alice"),
            exe: PathBuf::from("/usr/local/bin/loginator"),
            args,
        }
    }

    #[test]
    fn unit_runs_the_poll_loop() {
        let unit = manager(Vec::new()).unit_contents();
        assert!(unit.contains("ExecStart=/usr/local/bin/loginator -v run\n"));
        assert!(unit.contains("Restart=on-failure"));
        assert!(unit.contains("RestartSec=5"));
        assert!(unit.contains("WorkingDirectory=/home/alice"));
        assert!(unit.contains("WantedBy=default.target"));
    }

    #[test]
    fn unit_carries_global_flags_and_quotes_spaces() {
        let unit = manager(vec![
            "--plain-store".to_string(),
            "--credentials-file".to_string(),
            "/home/alice/My Files/creds.json".to_string(),
        ])
        .unit_contents();

        assert!(unit.contains(
            "ExecStart=/usr/local/bin/loginator --plain-store --credentials-file \"/home/alice/My Files/creds.json\" -v run"
        ));
    }

    #[test]
    fn unit_path_uses_service_name() {
        assert_eq!(
            manager(Vec::new()).unit_path(),
            PathBuf::from("/home/alice/.config/systemd/user/loginator.service")
        );
    }
}
