//! Environment-driven inputs (`JENKINS_JOB_URL`, `BUILD_TYPE`, `WORKSPACE`, `SENTRY_URL`).

use crate::error::DeployError;
use crate::platform::Platform;
use std::path::PathBuf;

pub const JOB_URL_VAR: &str = "JENKINS_JOB_URL";
pub const BUILD_TYPE_VAR: &str = "BUILD_TYPE";
pub const WORKSPACE_VAR: &str = "WORKSPACE";
pub const SENTRY_URL_VAR: &str = "SENTRY_URL";

/// Identifies which job and platform to fetch. Lookup key only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReference {
    pub job_url: String,
    pub platform: Platform,
}

/// Snapshot of the recognized environment variables. Empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployEnv {
    pub job_url: Option<String>,
    pub platform: Platform,
    pub workspace: Option<PathBuf>,
    pub sentry_url: Option<String>,
}

impl DeployEnv {
    pub fn from_env() -> Result<Self, DeployError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup so tests never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DeployError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let platform = match get(BUILD_TYPE_VAR) {
            Some(raw) => raw
                .parse::<Platform>()
                .map_err(|e| DeployError::Configuration(e.to_string()))?,
            None => Platform::default(),
        };

        Ok(Self {
            job_url: get(JOB_URL_VAR),
            platform,
            workspace: get(WORKSPACE_VAR).map(PathBuf::from),
            sentry_url: get(SENTRY_URL_VAR),
        })
    }

    /// The job to deploy from. Missing `JENKINS_JOB_URL` is fatal.
    pub fn build_reference(&self) -> Result<BuildReference, DeployError> {
        let job_url = self
            .job_url
            .clone()
            .ok_or_else(|| DeployError::Configuration(format!("{} is not set", JOB_URL_VAR)))?;
        Ok(BuildReference {
            job_url,
            platform: self.platform,
        })
    }

    /// Where downloads land: `WORKSPACE`, or the current directory when unset.
    pub fn workspace_dir(&self) -> PathBuf {
        self.workspace
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> Result<DeployEnv, DeployError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DeployEnv::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_defaults() {
        let env = env_of(&[]).unwrap();
        assert!(env.job_url.is_none());
        assert_eq!(env.platform, Platform::Win64);
        assert_eq!(env.workspace_dir(), PathBuf::from("."));
    }

    #[test]
    fn missing_job_url_is_configuration_error() {
        let env = env_of(&[(BUILD_TYPE_VAR, "Linux")]).unwrap();
        match env.build_reference() {
            Err(DeployError::Configuration(msg)) => assert_eq!(msg, "JENKINS_JOB_URL is not set"),
            other => panic!("expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn blank_job_url_counts_as_missing() {
        let env = env_of(&[(JOB_URL_VAR, "   ")]).unwrap();
        assert!(env.build_reference().is_err());
    }

    #[test]
    fn full_environment() {
        let env = env_of(&[
            (JOB_URL_VAR, "https://jenkins.tribler.org/job/Build"),
            (BUILD_TYPE_VAR, "macos"),
            (WORKSPACE_VAR, "/var/ws"),
            (SENTRY_URL_VAR, "https://key@sentry.example.org/1"),
        ])
        .unwrap();
        let reference = env.build_reference().unwrap();
        assert_eq!(reference.job_url, "https://jenkins.tribler.org/job/Build");
        assert_eq!(reference.platform, Platform::MacOS);
        assert_eq!(env.workspace_dir(), PathBuf::from("/var/ws"));
        assert!(env.sentry_url.is_some());
    }

    #[test]
    fn unknown_build_type_is_configuration_error() {
        assert!(matches!(
            env_of(&[(BUILD_TYPE_VAR, "Solaris")]),
            Err(DeployError::Configuration(_))
        ));
    }
}
