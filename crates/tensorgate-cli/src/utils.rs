//! CLI utility functions

use crate::config::LoggingConfig;
use std::io;
use tensorgate_types::{GateError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Setup logging from flags and configuration.
///
/// Logs always go to stderr so that command output on stdout stays
/// machine readable.
pub fn setup_logging(verbose: bool, quiet: bool, logging: &LoggingConfig) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()
    };
    result.map_err(|e| GateError::config(format!("Failed to install log subscriber: {}", e)))
}

/// Read a file into a string, naming the file on failure
pub async fn read_file(path: &std::path::Path, what: &str) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        GateError::io(format!(
            "Failed to read {} {}: {}",
            what,
            path.display(),
            e
        ))
    })
}
