//! Blocking HTTP GET helpers on libcurl.
//!
//! Used for the Jenkins JSON API and for artifact downloads. Downloads go to a
//! `.part` file first and are renamed over the destination, so every call
//! replaces whatever an earlier call left behind.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::JenkinsConfig;

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Transfer settings shared by every request of a run.
#[derive(Debug, Clone, Copy)]
pub struct HttpClient {
    connect_timeout: Duration,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(cfg: &JenkinsConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs.max(1)),
            timeout: Duration::from_secs(cfg.timeout_secs.max(1)),
        }
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.timeout(self.timeout)?;
        Ok(easy)
    }

    /// GET `url` and return the body.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        let mut easy = self.easy(url)?;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .with_context(|| format!("GET {} failed", url))?;
        }
        check_status(&mut easy, url)?;
        Ok(body)
    }

    /// GET `url` into `dest`, replacing any existing file. Returns bytes written.
    pub fn download_to(&self, url: &str, dest: &Path) -> Result<u64> {
        let part = temp_path(dest);
        let result = self.download_part(url, &part);
        match result {
            Ok(written) => {
                fs::rename(&part, dest).with_context(|| {
                    format!("rename {} -> {}", part.display(), dest.display())
                })?;
                tracing::debug!(url, dest = %dest.display(), written, "download complete");
                Ok(written)
            }
            Err(e) => {
                let _ = fs::remove_file(&part);
                Err(e)
            }
        }
    }

    fn download_part(&self, url: &str, part: &Path) -> Result<u64> {
        let mut file = File::create(part).with_context(|| format!("create {}", part.display()))?;
        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;
        let mut easy = self.easy(url)?;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(e).with_context(|| format!("write {}", part.display()));
        }
        performed.with_context(|| format!("GET {} failed", url))?;
        check_status(&mut easy, url)?;
        file.sync_all()
            .with_context(|| format!("sync {}", part.display()))?;
        Ok(written)
    }
}

fn check_status(easy: &mut curl::easy::Easy, url: &str) -> Result<()> {
    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(())
}
