pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod telemetry;

pub mod checksum;
pub mod http;
pub mod installer;
pub mod jenkins;
pub mod locator;
pub mod platform;
pub mod probe;
pub mod retry;
pub mod url_model;
pub mod workflow;

pub use error::DeployError;
