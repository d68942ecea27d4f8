//! Fetch, verify, install, confirm.
//!
//! The installer can exit 0 while its background finalization is still
//! pending or failing, so a clean exit only counts once the install probe
//! agrees.

use std::time::{Duration, Instant};

use crate::checksum::{self, Verification};
use crate::config::DeployConfig;
use crate::env::{BuildReference, DeployEnv};
use crate::error::DeployError;
use crate::installer::{InstallCommand, InstallerRunner};
use crate::locator::{ArtifactBundle, ArtifactLocator};
use crate::probe::InstallProbe;
use crate::retry::{DeployTimings, RetryDecision, Sleeper};

/// Verified successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub installer_path: std::path::PathBuf,
    /// 1-based number of the attempt that succeeded.
    pub attempts: u32,
    /// Wall time spent in the install loop, pre-install pause included.
    pub elapsed: Duration,
}

/// Everything one run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub reference: BuildReference,
    pub timings: DeployTimings,
    pub install_command: Option<Vec<String>>,
}

impl Deployment {
    /// Fails with a configuration error when `JENKINS_JOB_URL` is missing.
    pub fn new(env: &DeployEnv, cfg: &DeployConfig) -> Result<Self, DeployError> {
        Ok(Self {
            reference: env.build_reference()?,
            timings: cfg.timings.to_timings(),
            install_command: cfg.install.command.clone(),
        })
    }

    pub fn run<L, I, P, S>(
        &self,
        locator: &mut L,
        installer: &mut I,
        probe: &P,
        sleeper: &mut S,
    ) -> Result<DeployOutcome, DeployError>
    where
        L: ArtifactLocator + ?Sized,
        I: InstallerRunner + ?Sized,
        P: InstallProbe + ?Sized,
        S: Sleeper + ?Sized,
    {
        let bundle = fetch_verified(locator, &self.reference)?;
        let command = InstallCommand::render(
            self.reference.platform,
            self.install_command.as_deref(),
            &bundle.installer_path,
        )
        .map_err(|e| DeployError::Configuration(format!("{:#}", e)))?;
        let (attempts, elapsed) =
            install_with_retry(&command, &self.timings, installer, probe, sleeper)?;
        Ok(DeployOutcome {
            installer_path: bundle.installer_path,
            attempts,
            elapsed,
        })
    }
}

/// Full run from environment and config: the CLI's `install` path.
pub fn deploy<L, I, P, S>(
    env: &DeployEnv,
    cfg: &DeployConfig,
    locator: &mut L,
    installer: &mut I,
    probe: &P,
    sleeper: &mut S,
) -> Result<DeployOutcome, DeployError>
where
    L: ArtifactLocator + ?Sized,
    I: InstallerRunner + ?Sized,
    P: InstallProbe + ?Sized,
    S: Sleeper + ?Sized,
{
    Deployment::new(env, cfg)?.run(locator, installer, probe, sleeper)
}

/// Fetch the artifact and check its checksum; on mismatch fetch once more.
/// A second mismatch is fatal.
pub fn fetch_verified<L>(
    locator: &mut L,
    reference: &BuildReference,
) -> Result<ArtifactBundle, DeployError>
where
    L: ArtifactLocator + ?Sized,
{
    tracing::info!(job = %reference.job_url, platform = %reference.platform, "fetching latest artifacts");
    let bundle = locator.fetch_latest(reference)?;
    tracing::info!(path = %bundle.installer_path.display(), "artifacts are fetched");

    let actual = match verify_bundle(&bundle)? {
        Verification::Skipped => {
            tracing::info!("no checksum published, skipping verification");
            return Ok(bundle);
        }
        Verification::Match => return Ok(bundle),
        Verification::Mismatch { actual } => actual,
    };
    tracing::warn!(
        expected = bundle.expected_sha256.as_deref().unwrap_or_default(),
        actual = %actual,
        "SHA256 of file does not match target hash, downloading again"
    );

    let bundle = locator.fetch_latest(reference)?;
    match verify_bundle(&bundle)? {
        Verification::Skipped | Verification::Match => Ok(bundle),
        Verification::Mismatch { actual } => Err(DeployError::Integrity {
            expected: bundle.expected_sha256.unwrap_or_default(),
            path: bundle.installer_path,
            actual,
        }),
    }
}

fn verify_bundle(bundle: &ArtifactBundle) -> Result<Verification, DeployError> {
    checksum::verify(&bundle.installer_path, bundle.expected_sha256.as_deref())
        .map_err(DeployError::artifact)
}

/// Run `command` until the probe confirms the install or attempts run out.
/// Returns the successful attempt number and the total elapsed time.
pub fn install_with_retry<I, P, S>(
    command: &InstallCommand,
    timings: &DeployTimings,
    installer: &mut I,
    probe: &P,
    sleeper: &mut S,
) -> Result<(u32, Duration), DeployError>
where
    I: InstallerRunner + ?Sized,
    P: InstallProbe + ?Sized,
    S: Sleeper + ?Sized,
{
    let started = Instant::now();
    tracing::info!(delay = ?timings.pre_install_delay, "pre-install pause");
    sleeper.sleep(timings.pre_install_delay);

    let max_attempts = timings.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        if attempt == 1 {
            tracing::info!(program = %command.program, "installing");
        } else {
            tracing::info!(attempt, "trying again");
        }

        match installer.run(command) {
            Ok(result) if result.succeeded() => {
                sleeper.sleep(timings.settle_delay);
                if probe.is_installed() {
                    tracing::info!(attempt, elapsed = ?result.elapsed, "installed successfully");
                    return Ok((attempt, started.elapsed()));
                }
                tracing::warn!(
                    attempt,
                    elapsed = ?result.elapsed,
                    "installer exited cleanly but the application is not installed"
                );
            }
            Ok(result) => {
                tracing::warn!(
                    attempt,
                    exit_code = ?result.exit_code,
                    elapsed = ?result.elapsed,
                    stdout = %String::from_utf8_lossy(&result.stdout),
                    stderr = %String::from_utf8_lossy(&result.stderr),
                    "installer failed"
                );
            }
            Err(e) => {
                tracing::warn!(attempt, "installer could not be run: {:#}", e);
            }
        }

        match timings.decide(attempt) {
            RetryDecision::NoRetry => break,
            RetryDecision::RetryAfter(delay) => sleeper.sleep(delay),
        }
    }

    Err(DeployError::InstallFailed {
        attempts: max_attempts,
    })
}
