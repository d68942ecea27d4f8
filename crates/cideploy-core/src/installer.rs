//! Installer Runner: one blocking, non-interactive installer invocation.
//!
//! No retries and no timeout here; a hung installer blocks the run.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::platform::Platform;

/// Placeholder replaced by the installer path in command templates.
pub const INSTALLER_PLACEHOLDER: &str = "{installer}";

/// Program and arguments for one silent install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    /// Render `template` (or the platform default) for `installer`.
    pub fn render(platform: Platform, template: Option<&[String]>, installer: &Path) -> Result<Self> {
        let installer = installer.to_string_lossy();
        let mut parts: Vec<String> = match template {
            Some(t) => t
                .iter()
                .map(|p| p.replace(INSTALLER_PLACEHOLDER, &installer))
                .collect(),
            None => platform
                .default_install_command()
                .iter()
                .map(|p| p.replace(INSTALLER_PLACEHOLDER, &installer))
                .collect(),
        };
        if parts.is_empty() {
            anyhow::bail!("install command is empty");
        }
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }
}

/// Outcome of one installer process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallAttemptResult {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub elapsed: Duration,
}

impl InstallAttemptResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs the installer. Implementations block until the process exits.
pub trait InstallerRunner {
    fn run(&mut self, command: &InstallCommand) -> Result<InstallAttemptResult>;
}

/// Spawns the installer as a child process with captured output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInstaller;

impl InstallerRunner for ProcessInstaller {
    fn run(&mut self, command: &InstallCommand) -> Result<InstallAttemptResult> {
        let start = Instant::now();
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("spawn installer {}", command.program))?;
        Ok(InstallAttemptResult {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
            elapsed: start.elapsed(),
        })
    }
}
