//! Job URL modeling: decide whether `JENKINS_JOB_URL` points at a Jenkins job
//! or straight at an installer, and derive safe local filenames.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use crate::config::JenkinsConfig;
use crate::error::DeployError;
use crate::platform::Platform;

/// Default filename when neither the artifact metadata nor the URL yield a usable one.
const DEFAULT_FILENAME: &str = "artifact.bin";

/// What the configured job URL refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTarget {
    /// An installer URL downloaded as-is; no checksum is published for it.
    DirectArtifact { url: String, file_name: String },
    /// A Jenkins job whose last completed build is resolved through its JSON API.
    JenkinsJob { job_url: String },
}

/// Classify `job_url` for `platform`.
///
/// A trailing `/` is ignored. Direct artifacts must be `http(s)` with a host and
/// a path ending in the platform suffix. Jenkins jobs must be `https` (or `http`
/// when allowed) on one of the configured hosts.
pub fn classify(
    job_url: &str,
    platform: Platform,
    jenkins: &JenkinsConfig,
) -> Result<JobTarget, DeployError> {
    let job_url = job_url.trim().trim_end_matches('/');
    let invalid = || DeployError::Artifact("Did not find valid artifact URL".to_string());
    let parsed = url::Url::parse(job_url).map_err(|_| invalid())?;
    let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let scheme = parsed.scheme();

    if (scheme == "http" || scheme == "https")
        && parsed.path().ends_with(platform.artifact_suffix())
    {
        return Ok(JobTarget::DirectArtifact {
            url: job_url.to_string(),
            file_name: artifact_file_name(None, job_url),
        });
    }

    let scheme_ok = scheme == "https" || (scheme == "http" && jenkins.allow_insecure_http);
    let host_ok = jenkins
        .allowed_hosts
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(host));
    if scheme_ok && host_ok {
        return Ok(JobTarget::JenkinsJob {
            job_url: job_url.to_string(),
        });
    }

    Err(invalid())
}

/// Local filename for an artifact: the published name if any, else the last URL segment.
pub fn artifact_file_name(published: Option<&str>, url: &str) -> String {
    let candidate = published
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .or_else(|| filename_from_url_path(url));

    let sanitized = candidate.map(|c| sanitize_filename(&c)).unwrap_or_default();
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jenkins() -> JenkinsConfig {
        JenkinsConfig::default()
    }

    #[test]
    fn direct_artifact_url() {
        let t = classify(
            "https://downloads.example.org/nightly/Tribler_7.14_x64.exe",
            Platform::Win64,
            &jenkins(),
        )
        .unwrap();
        assert_eq!(
            t,
            JobTarget::DirectArtifact {
                url: "https://downloads.example.org/nightly/Tribler_7.14_x64.exe".into(),
                file_name: "Tribler_7.14_x64.exe".into(),
            }
        );
    }

    #[test]
    fn direct_artifact_over_plain_http_and_trailing_slash() {
        let t = classify("http://mirror.local/tribler.deb/", Platform::Linux, &jenkins()).unwrap();
        assert!(matches!(t, JobTarget::DirectArtifact { ref file_name, .. } if file_name == "tribler.deb"));
    }

    #[test]
    fn artifact_suffix_must_match_platform() {
        let err = classify("https://mirror.local/tribler.deb", Platform::MacOS, &jenkins())
            .unwrap_err();
        assert!(matches!(err, DeployError::Artifact(_)));
    }

    #[test]
    fn jenkins_job_url_on_allowed_host() {
        let t = classify(
            "https://jenkins-ci.tribler.org/job/Build-Tribler_release/",
            Platform::Win64,
            &jenkins(),
        )
        .unwrap();
        assert_eq!(
            t,
            JobTarget::JenkinsJob {
                job_url: "https://jenkins-ci.tribler.org/job/Build-Tribler_release".into()
            }
        );
    }

    #[test]
    fn jenkins_requires_https_unless_allowed() {
        let url = "http://jenkins.tribler.org/job/Build";
        assert!(classify(url, Platform::Win64, &jenkins()).is_err());
        let mut cfg = jenkins();
        cfg.allow_insecure_http = true;
        assert!(matches!(
            classify(url, Platform::Win64, &cfg),
            Ok(JobTarget::JenkinsJob { .. })
        ));
    }

    #[test]
    fn unknown_host_rejected() {
        let err = classify("https://evil.example.com/job/Build", Platform::Win64, &jenkins())
            .unwrap_err();
        assert_eq!(err.to_string(), "Did not find valid artifact URL");
    }

    #[test]
    fn garbage_rejected() {
        assert!(classify("not a url", Platform::Win64, &jenkins()).is_err());
        assert!(classify("ftp://jenkins.tribler.org/x_x64.exe", Platform::Win64, &jenkins()).is_err());
    }

    #[test]
    fn artifact_file_name_prefers_published_name() {
        assert_eq!(
            artifact_file_name(Some("Tribler_x64.exe"), "https://h/artifact/dist/other.exe"),
            "Tribler_x64.exe"
        );
        assert_eq!(
            artifact_file_name(None, "https://h/artifact/dist/other.exe"),
            "other.exe"
        );
        assert_eq!(artifact_file_name(Some(".."), "https://h/"), "artifact.bin");
    }
}
