//! Install command: the full deployment workflow.

use anyhow::Result;
use cideploy_core::config::DeployConfig;
use cideploy_core::env::DeployEnv;
use cideploy_core::installer::ProcessInstaller;
use cideploy_core::locator::CiArtifactLocator;
use cideploy_core::retry::ThreadSleeper;
use cideploy_core::workflow::deploy;

use super::host_probe;

pub fn run_install(env: &DeployEnv, cfg: &DeployConfig) -> Result<i32> {
    let mut locator = CiArtifactLocator::new(cfg.jenkins.clone(), env.workspace_dir());
    let probe = host_probe(env, cfg);
    let outcome = deploy(
        env,
        cfg,
        &mut locator,
        &mut ProcessInstaller,
        &*probe,
        &mut ThreadSleeper,
    )?;
    println!(
        "{} {} installed successfully after {} attempt(s) in {:.1}s",
        cfg.app_name,
        env.platform,
        outcome.attempts,
        outcome.elapsed.as_secs_f64()
    );
    Ok(0)
}
