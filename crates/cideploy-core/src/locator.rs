//! Artifact Locator: fetch the latest installer for a job and platform.

use std::path::PathBuf;

use crate::config::JenkinsConfig;
use crate::env::BuildReference;
use crate::error::DeployError;
use crate::http::HttpClient;
use crate::jenkins::JenkinsJob;
use crate::url_model::{classify, JobTarget};

/// A downloaded installer plus the checksum published for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactBundle {
    pub installer_path: PathBuf,
    pub expected_sha256: Option<String>,
}

/// Source of installers. Every call must fetch fresh bytes; implementations
/// never hand back a file downloaded by an earlier call.
pub trait ArtifactLocator {
    fn fetch_latest(&mut self, reference: &BuildReference) -> Result<ArtifactBundle, DeployError>;
}

/// Locator backed by a Jenkins server (or a direct installer URL).
#[derive(Debug, Clone)]
pub struct CiArtifactLocator {
    http: HttpClient,
    jenkins: JenkinsConfig,
    workspace: PathBuf,
}

impl CiArtifactLocator {
    pub fn new(jenkins: JenkinsConfig, workspace: PathBuf) -> Self {
        Self {
            http: HttpClient::new(&jenkins),
            jenkins,
            workspace,
        }
    }
}

impl ArtifactLocator for CiArtifactLocator {
    fn fetch_latest(&mut self, reference: &BuildReference) -> Result<ArtifactBundle, DeployError> {
        match classify(&reference.job_url, reference.platform, &self.jenkins)? {
            JobTarget::DirectArtifact { url, file_name } => {
                let dest = self.workspace.join(file_name);
                tracing::info!(url = %url, "downloading direct artifact");
                self.http
                    .download_to(&url, &dest)
                    .map_err(DeployError::artifact)?;
                Ok(ArtifactBundle {
                    installer_path: dest,
                    expected_sha256: None,
                })
            }
            JobTarget::JenkinsJob { job_url } => {
                let (installer_path, expected_sha256) = JenkinsJob::new(&self.http, &job_url)
                    .fetch_artifact(reference.platform, &self.workspace)?;
                Ok(ArtifactBundle {
                    installer_path,
                    expected_sha256,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn invalid_job_url_fails_before_any_transfer() {
        let dir = tempfile::tempdir().unwrap();
        let mut locator = CiArtifactLocator::new(JenkinsConfig::default(), dir.path().to_path_buf());
        let reference = BuildReference {
            job_url: "https://unknown.example.com/job/x".into(),
            platform: Platform::Win64,
        };
        let err = locator.fetch_latest(&reference).unwrap_err();
        assert!(matches!(err, DeployError::Artifact(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
