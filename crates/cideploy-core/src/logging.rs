//! Logging init: the CI console (stderr) by default, or a file under the XDG
//! state dir with `--log-file`.
//!
//! Both sinks also carry the Sentry layer: `error` events are reported and
//! lower levels become breadcrumbs once [`crate::telemetry::init`] has bound
//! a client. Without one the layer drops everything.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,cideploy=debug";

/// Log sink for one event. Falls back to the CI console when the log file
/// handle cannot be duplicated, so a run never goes silent.
enum LogSink {
    File(fs::File),
    Console,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Console => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Console => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(fs::File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Console)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn install(writer: BoxMakeWriter) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(sentry_tracing::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("init tracing: {}", e))
}

/// Path of the `--log-file` target: `$XDG_STATE_HOME/cideploy/cideploy.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cideploy")?;
    Ok(xdg_dirs.get_state_home().join("cideploy").join("cideploy.log"))
}

/// Log to [`log_file_path`], keeping stdout free for results and `ERROR:` lines.
/// On failure (state dir unwritable) returns Err so the caller can use the console.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    install(BoxMakeWriter::new(LogFile(file)))?;
    tracing::info!("cideploy logging to {}", path.display());
    Ok(path)
}

/// Log to stderr, which the CI job captures as the console log.
pub fn init_logging_stderr() {
    let _ = install(BoxMakeWriter::new(io::stderr));
}
