//! External command execution.

use std::process::{Command, Output, Stdio};

use tracing::debug;

use loginator_core::{Error, Result};

/// Both output streams of a finished command, trimmed.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run a command and return its trimmed stdout. Stderr goes to the
/// terminal.
pub fn run(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| command_error(program, e.to_string()))?;

    check(program, args, &output)?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a command and capture both stdout and stderr.
pub fn run_capture_all(program: &str, args: &[&str]) -> Result<CapturedOutput> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| command_error(program, e.to_string()))?;

    check(program, args, &output)?;
    Ok(CapturedOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

fn check(program: &str, args: &[&str], output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    debug!(program, ?args, status = %output.status, "Command failed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = match stderr.trim() {
        "" => format!("exited with {}", output.status),
        detail => format!("exited with {}: {}", output.status, detail),
    };
    Err(command_error(program, message))
}

fn command_error(program: &str, message: String) -> Error {
    Error::Command {
        program: program.to_string(),
        message,
    }
}
