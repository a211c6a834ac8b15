//! # AWS SDK Configuration
//!
//! Builds the shared `SdkConfig` used by the ElastiCache, EC2 and Secrets Manager
//! clients. Credentials come from the SDK's default provider chain (environment,
//! profile, IRSA web identity, instance metadata).

use super::ProvisionerConfig;
use aws_config::SdkConfig;
use tracing::debug;

/// Load AWS SDK config for the configured region and optional endpoint override
pub async fn load_sdk_config(config: &ProvisionerConfig) -> SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(
            region = config.region,
            endpoint = endpoint,
            "Routing AWS requests to endpoint override"
        );
        builder = builder.endpoint_url(endpoint);
    }

    builder.load().await
}
