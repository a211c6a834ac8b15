//! # Replication Group Manager
//!
//! Replication groups are created as a single node in a single shard with cluster
//! mode disabled. Modifications are field-presence patches applied immediately.

use super::empty_if_not_found;
use crate::constants::{ENGINE_REDIS, SINGLE_NODE_CACHE_CLUSTERS, SINGLE_SHARD_NODE_GROUPS};
use crate::error::Result;
use crate::provider::{CreateReplicationGroupRequest, ElastiCacheApi, ModifyReplicationGroupRequest};
use crate::types::{
    AuthTokenUpdateStrategy, CacheClusterNode, ClusterMode, CreateReplicationGroupOptions,
    ModifyReplicationGroupOptions, ReplicationGroup, Tag,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReplicationGroupManager {
    api: Arc<dyn ElastiCacheApi>,
    description: String,
}

impl std::fmt::Debug for ReplicationGroupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplicationGroupManager")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl ReplicationGroupManager {
    /// `description` is attached to every replication group this manager creates
    pub fn new(api: Arc<dyn ElastiCacheApi>, description: impl Into<String>) -> Self {
        Self {
            api,
            description: description.into(),
        }
    }

    /// Replication groups with this id; empty when none exists
    pub async fn describe(&self, id: &str) -> Result<Vec<ReplicationGroup>> {
        empty_if_not_found(self.api.describe_replication_groups(id).await)
    }

    pub async fn create(
        &self,
        tags: &[Tag],
        options: &CreateReplicationGroupOptions,
    ) -> Result<ReplicationGroup> {
        let request = build_create_request(&self.description, tags, options);
        self.api.create_replication_group(&request).await
    }

    /// Apply the fields set in `options` to an existing replication group
    pub async fn modify(
        &self,
        id: &str,
        options: &ModifyReplicationGroupOptions,
    ) -> Result<ReplicationGroup> {
        let request = build_modify_request(id, options);
        self.api.modify_replication_group(&request).await
    }

    /// Delete the replication group together with its primary cluster
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete_replication_group(id, false).await
    }

    /// Cache cluster nodes with this id; empty when none exists
    pub async fn describe_cluster(&self, id: &str) -> Result<Vec<CacheClusterNode>> {
        empty_if_not_found(self.api.describe_cache_clusters(id).await)
    }
}

fn build_create_request(
    description: &str,
    tags: &[Tag],
    options: &CreateReplicationGroupOptions,
) -> CreateReplicationGroupRequest {
    CreateReplicationGroupRequest {
        id: options.name.clone(),
        description: description.to_string(),
        subnet_group_name: options.subnet_group_name.clone(),
        parameter_group_name: options.parameter_group_name.clone(),
        cache_node_type: options.cache_node_type.clone(),
        num_cache_clusters: SINGLE_NODE_CACHE_CLUSTERS,
        num_node_groups: SINGLE_SHARD_NODE_GROUPS,
        cluster_mode: ClusterMode::Disabled,
        engine: ENGINE_REDIS.to_string(),
        engine_version: options.engine_version.clone(),
        auto_minor_version_upgrade: options.auto_minor_version_upgrade,
        auth_token: options.auth_token.clone(),
        transit_encryption_enabled: options.transit_encryption_enabled,
        preferred_maintenance_window: options.preferred_maintenance_window.clone(),
        security_group_ids: options.security_group_ids.clone(),
        tags: tags.to_vec(),
    }
}

fn build_modify_request(
    id: &str,
    options: &ModifyReplicationGroupOptions,
) -> ModifyReplicationGroupRequest {
    let adds_user_groups = !options.user_group_ids_to_add.is_empty();
    // Attaching RBAC user groups retires token auth in the same request
    let auth_token_update_strategy = if adds_user_groups {
        Some(AuthTokenUpdateStrategy::Delete)
    } else {
        options.auth_token_update_strategy
    };

    ModifyReplicationGroupRequest {
        id: id.to_string(),
        apply_immediately: true,
        cache_node_type: options.cache_node_type.clone(),
        engine_version: options.engine_version.clone(),
        auto_minor_version_upgrade: options.auto_minor_version_upgrade,
        preferred_maintenance_window: options.preferred_maintenance_window.clone(),
        transit_encryption_enabled: options.transit_encryption_enabled,
        transit_encryption_mode: options.transit_encryption_mode,
        auth_token: options.auth_token.clone(),
        auth_token_update_strategy,
        user_group_ids_to_add: adds_user_groups.then(|| options.user_group_ids_to_add.clone()),
        user_group_ids_to_remove: (!options.user_group_ids_to_remove.is_empty())
            .then(|| options.user_group_ids_to_remove.clone()),
    }
}
