use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::DeployTimings;

/// Delays and attempt ceiling for the install loop (`[timings]` in config.toml).
///
/// The defaults are empirically tuned against the Windows installer subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingsConfig {
    /// Maximum number of install attempts (including the first).
    pub max_attempts: u32,
    /// Pause before the first attempt so a previous uninstaller can finish cleanup.
    pub pre_install_delay_secs: f64,
    /// Pause between a clean installer exit and the install probe.
    pub settle_delay_secs: f64,
    /// Pause between failed attempts.
    pub retry_backoff_secs: f64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            pre_install_delay_secs: 10.0,
            settle_delay_secs: 3.0,
            retry_backoff_secs: 10.0,
        }
    }
}

impl TimingsConfig {
    pub fn to_timings(&self) -> DeployTimings {
        DeployTimings {
            max_attempts: self.max_attempts.max(1),
            pre_install_delay: secs(self.pre_install_delay_secs),
            settle_delay: secs(self.settle_delay_secs),
            retry_backoff: secs(self.retry_backoff_secs),
        }
    }
}

fn secs(v: f64) -> Duration {
    if v.is_finite() && v > 0.0 {
        Duration::from_secs_f64(v)
    } else {
        Duration::ZERO
    }
}

/// CI server access (`[jenkins]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JenkinsConfig {
    /// Hosts accepted as Jenkins job URLs.
    pub allowed_hosts: Vec<String>,
    /// Accept `http://` job URLs (local mirrors, tests).
    pub allow_insecure_http: bool,
    pub connect_timeout_secs: u64,
    /// Upper bound for a single transfer (installers can be large).
    pub timeout_secs: u64,
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: vec![
                "jenkins.tribler.org".to_string(),
                "jenkins-ci.tribler.org".to_string(),
            ],
            allow_insecure_http: false,
            connect_timeout_secs: 30,
            timeout_secs: 3600,
        }
    }
}

/// Installer invocation and install detection (`[install]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstallConfig {
    /// Command line overriding the platform default; `{installer}` is substituted.
    pub command: Option<Vec<String>>,
    /// Directory that must exist once the application is installed.
    pub install_dir: Option<PathBuf>,
    /// Executable that must exist once the application is installed.
    pub executable: Option<PathBuf>,
}

/// Global configuration loaded from `~/.config/cideploy/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployConfig {
    /// Display name of the deployed application; drives default install paths.
    pub app_name: String,
    #[serde(default)]
    pub timings: TimingsConfig,
    #[serde(default)]
    pub jenkins: JenkinsConfig,
    #[serde(default)]
    pub install: InstallConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            app_name: "Tribler".to_string(),
            timings: TimingsConfig::default(),
            jenkins: JenkinsConfig::default(),
            install: InstallConfig::default(),
        }
    }
}

/// Existing `config.toml` under the XDG config dirs, if any. Never creates directories.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cideploy")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from the XDG location, or built-in defaults when there is none.
/// Nothing is written; a CI agent only ever gets the downloaded artifact on disk.
/// An unusable home directory (read-only CI users) also yields the defaults.
pub fn load_or_default() -> Result<DeployConfig> {
    let path = config_path().unwrap_or_else(|e| {
        tracing::warn!("config dir unavailable, using defaults: {:#}", e);
        None
    });
    match path {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("no config.toml found, using defaults");
            Ok(DeployConfig::default())
        }
    }
}

/// Load configuration from an explicit path (`--config`). The file must exist.
pub fn load_from(path: &Path) -> Result<DeployConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: DeployConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
