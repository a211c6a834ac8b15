//! # Configuration
//!
//! Provisioner settings loaded from environment variables.
//!
//! - `ProvisionerConfig` - region, endpoint override, logging and metrics settings
//! - `aws` - AWS SDK configuration built from `ProvisionerConfig`

pub mod aws;

use crate::constants::{DEFAULT_AWS_REGION, DEFAULT_REPLICATION_GROUP_DESCRIPTION};
use serde::{Deserialize, Serialize};

/// Provisioner configuration
///
/// All settings have defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionerConfig {
    /// AWS region the clients talk to
    pub region: String,
    /// Endpoint override for all three services (local emulators)
    pub endpoint_url: Option<String>,
    /// Description attached to created replication groups
    pub replication_group_description: String,
    /// Cache engine default parameters per family for the process lifetime
    pub engine_defaults_cache_enabled: bool,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_AWS_REGION.to_string(),
            endpoint_url: None,
            replication_group_description: DEFAULT_REPLICATION_GROUP_DESCRIPTION.to_string(),
            engine_defaults_cache_enabled: true,
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            enable_metrics: true,
        }
    }
}

impl ProvisionerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            region: lookup("AWS_REGION")
                .or_else(|| lookup("AWS_DEFAULT_REGION"))
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.region),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|v| !v.is_empty()),
            replication_group_description: lookup("ELASTICACHE_REPLICATION_GROUP_DESCRIPTION")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.replication_group_description),
            engine_defaults_cache_enabled: parse_bool(
                lookup("ELASTICACHE_ENGINE_DEFAULTS_CACHE"),
                defaults.engine_defaults_cache_enabled,
            ),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT").unwrap_or(defaults.log_format),
            enable_metrics: parse_bool(lookup("ENABLE_METRICS"), defaults.enable_metrics),
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}
