//! SHA-256 integrity check of downloaded installers.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Outcome of verifying a file against an optional expected digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// No checksum was published; nothing to compare.
    Skipped,
    Match,
    Mismatch { actual: String },
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded; suitable for large files.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Verify `path` against `expected` (hex, case-insensitive, surrounding whitespace ignored).
/// `None` skips the check.
pub fn verify(path: &Path, expected: Option<&str>) -> Result<Verification> {
    let Some(expected) = expected else {
        return Ok(Verification::Skipped);
    };
    let actual = sha256_path(path)?;
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(Verification::Match)
    } else {
        Ok(Verification::Mismatch { actual })
    }
}
