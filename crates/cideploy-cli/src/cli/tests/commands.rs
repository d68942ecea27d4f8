//! Tests for subcommands and global flags.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_no_subcommand_defaults_to_install() {
    let cli = parse(&["cideploy"]);
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
    assert!(!cli.log_file);
}

#[test]
fn cli_parse_install() {
    assert!(matches!(parse(&["cideploy", "install"]).command, Some(CliCommand::Install)));
}

#[test]
fn cli_parse_fetch_and_probe() {
    assert!(matches!(parse(&["cideploy", "fetch"]).command, Some(CliCommand::Fetch)));
    assert!(matches!(parse(&["cideploy", "probe"]).command, Some(CliCommand::Probe)));
}

#[test]
fn cli_parse_checksum() {
    match parse(&["cideploy", "checksum", "/ws/setup_x64.exe"]).command {
        Some(CliCommand::Checksum { path }) => {
            assert_eq!(path, Path::new("/ws/setup_x64.exe"));
        }
        other => panic!("expected Checksum, got {:?}", other),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse(&["cideploy", "install", "--config", "/etc/cideploy.toml", "--log-file"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/cideploy.toml")));
    assert!(cli.log_file);
}

#[test]
fn cli_parse_checksum_requires_path() {
    assert!(Cli::try_parse_from(["cideploy", "checksum"]).is_err());
}

#[test]
fn cli_parse_unknown_subcommand() {
    assert!(Cli::try_parse_from(["cideploy", "upgrade"]).is_err());
}

#[test]
fn checksum_runs_without_config_or_env() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut f, b"hello\n").unwrap();
    let path = f.path().to_string_lossy().into_owned();
    let code = parse(&["cideploy", "checksum", path.as_str()]).run().unwrap();
    assert_eq!(code, 0);
}

#[test]
fn explicit_missing_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let cli = parse(&["cideploy", "probe", "--config", missing.to_str().unwrap()]);
    assert!(cli.run().is_err());
}
