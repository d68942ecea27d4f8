//! CLI for cideploy.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cideploy_core::config::{self, DeployConfig};
use cideploy_core::env::DeployEnv;
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_fetch, run_install, run_probe};

/// Top-level CLI. Job, platform and workspace come from the environment
/// (`JENKINS_JOB_URL`, `BUILD_TYPE`, `WORKSPACE`).
#[derive(Debug, Parser)]
#[command(name = "cideploy")]
#[command(about = "Fetch the latest CI installer, verify it, install it silently", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/cideploy/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to ~/.local/state/cideploy/cideploy.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch, verify, install and confirm the latest build (default).
    Install,

    /// Fetch and verify the latest build only; print the installer path.
    Fetch,

    /// Report whether the application is installed (exit 0 if it is).
    Probe,

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl Cli {
    /// Run the selected command and return the process exit code.
    pub fn run(self) -> Result<i32> {
        match self.command.unwrap_or(CliCommand::Install) {
            CliCommand::Install => {
                let (env, cfg) = deploy_inputs(self.config.as_deref())?;
                run_install(&env, &cfg)
            }
            CliCommand::Fetch => {
                let (env, cfg) = deploy_inputs(self.config.as_deref())?;
                run_fetch(&env, &cfg)
            }
            CliCommand::Probe => {
                let env = DeployEnv::from_env()?;
                let cfg = load_config(self.config.as_deref())?;
                run_probe(&env, &cfg)
            }
            CliCommand::Checksum { path } => {
                run_checksum(&path)?;
                Ok(0)
            }
        }
    }
}

/// Environment first: a missing `JENKINS_JOB_URL` fails before any config is read.
fn deploy_inputs(config: Option<&Path>) -> Result<(DeployEnv, DeployConfig)> {
    let env = DeployEnv::from_env()?;
    env.build_reference()?;
    let cfg = load_config(config)?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok((env, cfg))
}

/// Explicit `--config` must load; otherwise the XDG config if present, else defaults.
fn load_config(path: Option<&Path>) -> Result<DeployConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_default(),
    }
}

#[cfg(test)]
mod tests;
