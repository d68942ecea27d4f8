//! Probe command: is the application installed on this host?

use anyhow::Result;
use cideploy_core::config::DeployConfig;
use cideploy_core::env::DeployEnv;

use super::host_probe;

pub fn run_probe(env: &DeployEnv, cfg: &DeployConfig) -> Result<i32> {
    if host_probe(env, cfg).is_installed() {
        println!("{} is installed", cfg.app_name);
        Ok(0)
    } else {
        println!("{} is not installed", cfg.app_name);
        Ok(1)
    }
}
