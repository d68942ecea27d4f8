//! CLI command handlers. Each command is in its own file.

mod checksum;
mod fetch;
mod install;
mod probe;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use install::run_install;
pub use probe::run_probe;

use cideploy_core::config::DeployConfig;
use cideploy_core::env::DeployEnv;
use cideploy_core::probe::{InstallProbe, NeverInstalled, PathProbe};

/// Install probe for this host, honoring `[install]` overrides.
fn host_probe(env: &DeployEnv, cfg: &DeployConfig) -> Box<dyn InstallProbe> {
    match PathProbe::for_host(&cfg.app_name, &env.workspace_dir(), &cfg.install) {
        Some(p) => Box::new(p),
        None => {
            tracing::warn!("no install layout known for this host; install can never be confirmed");
            Box::new(NeverInstalled)
        }
    }
}
