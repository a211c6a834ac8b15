//! # Logging
//!
//! Tracing subscriber setup for binaries embedding the provisioner.
//!
//! `RUST_LOG` takes precedence; otherwise the configured `LOG_LEVEL` applies.

use crate::config::ProvisionerConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ProvisionerConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json_logs() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

fn default_directive(log_level: &str) -> String {
    let level = match log_level.to_ascii_uppercase().as_str() {
        "ERROR" => "error",
        "WARN" => "warn",
        "DEBUG" => "debug",
        "TRACE" => "trace",
        _ => "info",
    };
    format!("elasticache_provisioner={level},elasticachectl={level}")
}
