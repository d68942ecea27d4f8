//! Fetch command: locate, download and verify without installing.

use anyhow::Result;
use cideploy_core::config::DeployConfig;
use cideploy_core::env::DeployEnv;
use cideploy_core::locator::CiArtifactLocator;
use cideploy_core::workflow::fetch_verified;

pub fn run_fetch(env: &DeployEnv, cfg: &DeployConfig) -> Result<i32> {
    let reference = env.build_reference()?;
    let mut locator = CiArtifactLocator::new(cfg.jenkins.clone(), env.workspace_dir());
    let bundle = fetch_verified(&mut locator, &reference)?;
    println!("{}", bundle.installer_path.display());
    Ok(0)
}
