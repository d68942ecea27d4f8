use cideploy_core::env::SENTRY_URL_VAR;
use cideploy_core::{logging, telemetry};

mod cli;

use crate::cli::Cli;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if cli.log_file {
        if let Err(err) = logging::init_logging() {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
        }
    } else {
        logging::init_logging_stderr();
    }

    let sentry_url = std::env::var(SENTRY_URL_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty());
    let reporting = telemetry::init(sentry_url.as_deref());

    let code = match cli.run() {
        Ok(code) => code,
        Err(err) => {
            let msg = format!("{:#}", err);
            telemetry::report_fatal(&msg);
            println!("ERROR: {}", msg);
            1
        }
    };
    // process::exit skips destructors; flush reports first.
    drop(reporting);
    std::process::exit(code);
}
