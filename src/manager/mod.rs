//! # Managers
//!
//! One manager per remote resource kind a replication group depends on. Each
//! manager is a narrow wrapper over a single remote API trait: managers never call
//! each other, so composing them into a cluster lifecycle stays with the caller.
//!
//! Conventions shared by every manager:
//!
//! - describe-style operations turn a provider "not found" into an empty `Vec` or
//!   `None`; every other failure is returned unchanged
//! - mutating operations return provider failures unchanged, not-found included
//! - nothing is retried, rolled back or logged above `debug`
//!
//! [`ElastiCacheClient`] bundles all six managers over one set of API clients.

mod auth_token;
mod cache;
mod pagination;
mod parameter_group;
mod replication_group;
mod security_group;
mod subnet_group;
mod user_group;

pub use auth_token::AuthTokenManager;
pub use cache::EngineDefaultsCache;
pub use parameter_group::ParameterGroupManager;
pub use replication_group::ReplicationGroupManager;
pub use security_group::SecurityGroupManager;
pub use subnet_group::SubnetGroupManager;
pub use user_group::UserGroupManager;

use crate::config::ProvisionerConfig;
use crate::error::Result;
use crate::provider::aws::{AwsEc2, AwsElastiCache, AwsSecretsManager};
use crate::provider::{Ec2Api, ElastiCacheApi, SecretsManagerApi};
use aws_config::SdkConfig;
use std::sync::Arc;

/// Treat "not found" as an empty listing
pub(crate) fn empty_if_not_found<T>(result: Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// Treat "not found" as an absent value
pub(crate) fn none_if_not_found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// All managers, sharing API clients and one engine defaults cache
#[derive(Clone)]
pub struct ElastiCacheClient {
    pub subnet_groups: SubnetGroupManager,
    pub parameter_groups: ParameterGroupManager,
    pub security_groups: SecurityGroupManager,
    pub auth_tokens: AuthTokenManager,
    pub user_groups: UserGroupManager,
    pub replication_groups: ReplicationGroupManager,
}

impl ElastiCacheClient {
    /// Build AWS SDK clients from a loaded `SdkConfig`
    #[must_use]
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: &ProvisionerConfig) -> Self {
        let cache = if config.engine_defaults_cache_enabled {
            EngineDefaultsCache::new()
        } else {
            EngineDefaultsCache::disabled()
        };

        Self::from_apis(
            Arc::new(AwsElastiCache::new(sdk_config)),
            Arc::new(AwsEc2::new(sdk_config)),
            Arc::new(AwsSecretsManager::new(sdk_config)),
            Arc::new(cache),
            config.replication_group_description.clone(),
        )
    }

    /// Build from arbitrary API implementations (fakes in tests)
    #[must_use]
    pub fn from_apis(
        elasticache: Arc<dyn ElastiCacheApi>,
        ec2: Arc<dyn Ec2Api>,
        secrets: Arc<dyn SecretsManagerApi>,
        engine_defaults: Arc<EngineDefaultsCache>,
        replication_group_description: String,
    ) -> Self {
        Self {
            subnet_groups: SubnetGroupManager::new(Arc::clone(&elasticache)),
            parameter_groups: ParameterGroupManager::new(Arc::clone(&elasticache), engine_defaults),
            security_groups: SecurityGroupManager::new(ec2),
            auth_tokens: AuthTokenManager::new(secrets),
            user_groups: UserGroupManager::new(Arc::clone(&elasticache)),
            replication_groups: ReplicationGroupManager::new(
                elasticache,
                replication_group_description,
            ),
        }
    }
}

impl std::fmt::Debug for ElastiCacheClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElastiCacheClient")
            .field("engine_defaults", self.parameter_groups.engine_defaults())
            .finish_non_exhaustive()
    }
}
