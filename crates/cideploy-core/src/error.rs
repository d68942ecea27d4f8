//! Fatal deployment errors.
//!
//! Every variant terminates the run; the CLI prints it and exits non-zero.
//! Install failures below the attempt ceiling are not errors, they are
//! logged and retried inside the workflow.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Required input missing or malformed (environment or config).
    #[error("{0}")]
    Configuration(String),

    /// The artifact could not be located or downloaded.
    #[error("{0}")]
    Artifact(String),

    /// Checksum still mismatching after one re-fetch.
    #[error(
        "SHA256 of {} is {actual}, expected {expected}; download seems to be really broken",
        .path.display()
    )]
    Integrity {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Attempt ceiling exhausted without a verified install.
    #[error("application has not been correctly installed after {attempts} attempt(s)")]
    InstallFailed { attempts: u32 },
}

impl DeployError {
    /// Wraps a plumbing failure (HTTP, JSON) from the locator.
    pub fn artifact(err: anyhow::Error) -> Self {
        DeployError::Artifact(format!("{:#}", err))
    }
}
