//! Jenkins resolution: last completed build, its artifact list, and the
//! published `SHA256.txt`.

mod api;
mod sha256_file;

pub use api::{parse_build, parse_job, select_artifact, Artifact, BuildInfo, JobInfo};
pub use sha256_file::checksum_for;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DeployError;
use crate::http::HttpClient;
use crate::platform::Platform;
use crate::url_model::artifact_file_name;

/// Name of the checksum listing published by the build.
pub const SHA256_FILE: &str = "SHA256.txt";

/// Jenkins API access for one job.
#[derive(Debug, Clone)]
pub struct JenkinsJob<'a> {
    http: &'a HttpClient,
    job_url: &'a str,
}

impl<'a> JenkinsJob<'a> {
    pub fn new(http: &'a HttpClient, job_url: &'a str) -> Self {
        Self { http, job_url }
    }

    /// URL of the last completed build (`<job>/<number>`).
    pub fn last_completed_build_url(&self) -> Result<String, DeployError> {
        let body = self
            .http
            .get_bytes(&format!("{}/api/json", self.job_url))
            .map_err(DeployError::artifact)?;
        let job = parse_job(&body).map_err(DeployError::artifact)?;
        let build = job.last_completed_build.ok_or_else(|| {
            DeployError::Artifact(format!("job {} has no completed build", self.job_url))
        })?;
        Ok(format!("{}/{}", self.job_url, build.number))
    }

    /// Download the platform installer and its published checksum into `workspace`.
    pub fn fetch_artifact(
        &self,
        platform: Platform,
        workspace: &Path,
    ) -> Result<(PathBuf, Option<String>), DeployError> {
        let build_url = self.last_completed_build_url()?;
        tracing::info!(build_url = %build_url, "resolved last completed build");

        let body = self
            .http
            .get_bytes(&format!("{}/api/json", build_url))
            .map_err(DeployError::artifact)?;
        let build = parse_build(&body).map_err(DeployError::artifact)?;
        if build.artifacts.is_empty() {
            return Err(DeployError::Artifact("No artifacts found!".to_string()));
        }

        let suffix = platform.artifact_suffix();
        let artifact = select_artifact(&build.artifacts, suffix).ok_or_else(|| {
            DeployError::Artifact(format!("{} is not present in the artifact list", suffix))
        })?;

        let artifact_url = format!("{}/artifact/{}", build_url, artifact.relative_path);
        let dest = workspace.join(artifact_file_name(Some(&artifact.file_name), &artifact_url));
        self.http
            .download_to(&artifact_url, &dest)
            .with_context(|| format!("download {}", artifact.file_name))
            .map_err(DeployError::artifact)?;

        let expected = self.fetch_checksum(&build_url, suffix, workspace);
        Ok((dest, expected))
    }

    /// Hash for `suffix` from the build's `SHA256.txt`. Absent when the file is
    /// not published or has no matching entry.
    fn fetch_checksum(&self, build_url: &str, suffix: &str, workspace: &Path) -> Option<String> {
        let url = format!("{}/artifact/{}", build_url, SHA256_FILE);
        let dest = workspace.join(SHA256_FILE);
        let contents = self
            .http
            .download_to(&url, &dest)
            .and_then(|_| {
                fs::read_to_string(&dest).with_context(|| format!("read {}", dest.display()))
            });
        match contents {
            Ok(text) => {
                let hash = checksum_for(&text, suffix);
                if hash.is_none() {
                    tracing::warn!(suffix, "no entry for artifact in {}", SHA256_FILE);
                }
                hash
            }
            Err(e) => {
                tracing::warn!("no checksum published: {:#}", e);
                None
            }
        }
    }
}
