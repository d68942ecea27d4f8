//! `SHA256.txt` published next to the build artifacts.
//!
//! One line per artifact in `sha256sum` text format: `<hex>  <name>`.

/// Hex digest of the first entry whose name contains `suffix`.
pub fn checksum_for(contents: &str, suffix: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let (hash, name) = line.split_once("  ")?;
        let hash = hash.trim();
        if !hash.is_empty() && name.contains(suffix) {
            Some(hash.to_string())
        } else {
            None
        }
    })
}
