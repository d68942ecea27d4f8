//! Jenkins JSON API payloads (`<job>/api/json`, `<build>/api/json`).

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    #[serde(default)]
    pub last_completed_build: Option<BuildRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildRef {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub file_name: String,
    pub relative_path: String,
}

pub fn parse_job(body: &[u8]) -> Result<JobInfo> {
    serde_json::from_slice(body).context("parse job json")
}

pub fn parse_build(body: &[u8]) -> Result<BuildInfo> {
    serde_json::from_slice(body).context("parse build json")
}

/// First artifact whose file name contains `suffix`.
pub fn select_artifact<'a>(artifacts: &'a [Artifact], suffix: &str) -> Option<&'a Artifact> {
    artifacts.iter().find(|a| a.file_name.contains(suffix))
}
