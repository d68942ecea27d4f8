//! Install Verifier: is the application present on this machine?

use std::path::{Path, PathBuf};

use crate::config::InstallConfig;

/// Independent check that an install actually landed.
pub trait InstallProbe {
    fn is_installed(&self) -> bool;
}

/// Installed when both the install directory and the executable exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathProbe {
    pub install_dir: PathBuf,
    pub executable: PathBuf,
}

impl PathProbe {
    /// Probe for the host OS, with config overrides taking precedence.
    ///
    /// Returns `None` on hosts without a known install layout and no override.
    pub fn for_host(app_name: &str, workspace: &Path, install: &InstallConfig) -> Option<Self> {
        let defaults = host_layout(app_name, workspace);
        let install_dir = install
            .install_dir
            .clone()
            .or_else(|| defaults.as_ref().map(|d| d.install_dir.clone()))?;
        let executable = install
            .executable
            .clone()
            .or_else(|| defaults.map(|d| d.executable))?;
        Some(Self {
            install_dir,
            executable,
        })
    }
}

impl InstallProbe for PathProbe {
    fn is_installed(&self) -> bool {
        let found = self.install_dir.exists() && self.executable.exists();
        tracing::debug!(
            install_dir = %self.install_dir.display(),
            executable = %self.executable.display(),
            found,
            "install probe"
        );
        found
    }
}

/// Fallback when no layout is known: never installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInstalled;

impl InstallProbe for NeverInstalled {
    fn is_installed(&self) -> bool {
        false
    }
}

fn host_layout(app_name: &str, workspace: &Path) -> Option<PathProbe> {
    if cfg!(target_os = "windows") {
        Some(windows_layout(app_name))
    } else if cfg!(target_os = "linux") {
        Some(linux_layout(app_name))
    } else if cfg!(target_os = "macos") {
        Some(macos_layout(app_name, workspace))
    } else {
        None
    }
}

fn windows_layout(app_name: &str) -> PathProbe {
    let dir = PathBuf::from(r"C:\Program Files").join(app_name);
    PathProbe {
        executable: dir.join(format!("{}.exe", app_name.to_lowercase())),
        install_dir: dir,
    }
}

fn linux_layout(app_name: &str) -> PathProbe {
    let lower = app_name.to_lowercase();
    PathProbe {
        install_dir: PathBuf::from("/usr/share").join(&lower),
        executable: PathBuf::from("/usr/bin").join(&lower),
    }
}

fn macos_layout(app_name: &str, workspace: &Path) -> PathProbe {
    let bundle = workspace.join(format!("{}.app", app_name));
    PathProbe {
        executable: bundle
            .join("Contents")
            .join("MacOS")
            .join(app_name.to_lowercase()),
        install_dir: bundle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn layouts() {
        assert_eq!(
            linux_layout("Tribler"),
            PathProbe {
                install_dir: PathBuf::from("/usr/share/tribler"),
                executable: PathBuf::from("/usr/bin/tribler"),
            }
        );
        let mac = macos_layout("Tribler", Path::new("/ws"));
        assert_eq!(mac.install_dir, PathBuf::from("/ws/Tribler.app"));
        assert_eq!(
            mac.executable,
            PathBuf::from("/ws/Tribler.app/Contents/MacOS/tribler")
        );
        let win = windows_layout("Tribler");
        assert!(win.executable.to_string_lossy().ends_with("tribler.exe"));
    }

    #[test]
    fn config_overrides_host_defaults() {
        let install = InstallConfig {
            command: None,
            install_dir: Some(PathBuf::from("/opt/demo")),
            executable: Some(PathBuf::from("/opt/demo/demo")),
        };
        let probe = PathProbe::for_host("Demo", Path::new("."), &install).unwrap();
        assert_eq!(probe.install_dir, PathBuf::from("/opt/demo"));
        assert_eq!(probe.executable, PathBuf::from("/opt/demo/demo"));
    }

    #[test]
    fn requires_dir_and_executable() {
        let dir = tempfile::tempdir().unwrap();
        let probe = PathProbe {
            install_dir: dir.path().join("app"),
            executable: dir.path().join("app").join("bin"),
        };
        assert!(!probe.is_installed());
        fs::create_dir(&probe.install_dir).unwrap();
        assert!(!probe.is_installed());
        fs::write(&probe.executable, b"#!").unwrap();
        assert!(probe.is_installed());
    }

    #[test]
    fn never_installed() {
        assert!(!NeverInstalled.is_installed());
    }
}
