//! Target platforms (`BUILD_TYPE`) and their artifact naming.

use std::fmt;
use std::str::FromStr;

/// Mounts the image, copies its `.app` bundle next to the image, detaches.
/// `$1` is the `.dmg`; the bundle lands in the download directory.
const MACOS_INSTALL_SCRIPT: &str = "set -e; mnt=$(mktemp -d); \
hdiutil attach -nobrowse -noautoopen -mountpoint \"$mnt\" \"$1\" >/dev/null; \
trap 'hdiutil detach \"$mnt\" -quiet' EXIT; \
cp -R \"$mnt\"/*.app \"$(dirname \"$1\")\"/";

/// Build type published by the CI job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Win64,
    Win32,
    Linux,
    MacOS,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Win64,
        Platform::Win32,
        Platform::Linux,
        Platform::MacOS,
    ];

    /// Suffix that identifies this platform's installer in an artifact file name.
    pub fn artifact_suffix(self) -> &'static str {
        match self {
            Platform::Win64 => "_x64.exe",
            Platform::Win32 => "x86.exe",
            Platform::Linux => ".deb",
            Platform::MacOS => ".dmg",
        }
    }

    /// Default non-interactive install command; `{installer}` is replaced by the file path.
    pub fn default_install_command(self) -> &'static [&'static str] {
        match self {
            Platform::Win64 | Platform::Win32 => &["{installer}", "/S"],
            Platform::Linux => &["dpkg", "-i", "{installer}"],
            Platform::MacOS => &["sh", "-c", MACOS_INSTALL_SCRIPT, "sh", "{installer}"],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Win64 => "Win64",
            Platform::Win32 => "Win32",
            Platform::Linux => "Linux",
            Platform::MacOS => "MacOS",
        };
        f.write_str(s)
    }
}

/// Error for an unrecognized `BUILD_TYPE`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported build type {0:?}; supported types are [Win64, Win32, Linux, MacOS]")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}
