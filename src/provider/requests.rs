//! # Requests
//!
//! Outgoing request shapes for the create/modify calls.
//!
//! Managers build these from caller options; the remote API implementations map
//! them field by field onto SDK builders. Keeping them as plain data lets tests
//! assert exactly what would have been sent.

use crate::types::{
    AuthTokenUpdateStrategy, ClusterMode, ParameterNameValue, Tag, TransitEncryptionMode,
};
use zeroize::Zeroizing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubnetGroupRequest {
    pub name: String,
    pub description: String,
    pub subnet_ids: Vec<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParameterGroupRequest {
    pub name: String,
    pub family: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyParameterGroupRequest {
    pub name: String,
    pub parameters: Vec<ParameterNameValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSecurityGroupRequest {
    pub vpc_id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

#[derive(Clone)]
pub struct CreateSecretRequest {
    pub name: String,
    pub secret_string: Zeroizing<String>,
    pub tags: Vec<Tag>,
}

impl std::fmt::Debug for CreateSecretRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateSecretRequest")
            .field("name", &self.name)
            .field("secret_string", &"***")
            .field("tags", &self.tags)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserGroupRequest {
    pub id: String,
    pub engine: String,
    pub user_ids: Vec<String>,
    pub tags: Vec<Tag>,
}

#[derive(Clone)]
pub struct CreateReplicationGroupRequest {
    pub id: String,
    pub description: String,
    pub subnet_group_name: String,
    pub parameter_group_name: String,
    pub cache_node_type: String,
    pub num_cache_clusters: i32,
    pub num_node_groups: i32,
    pub cluster_mode: ClusterMode,
    pub engine: String,
    pub engine_version: String,
    pub auto_minor_version_upgrade: bool,
    pub auth_token: Option<Zeroizing<String>>,
    pub transit_encryption_enabled: bool,
    pub preferred_maintenance_window: Option<String>,
    pub security_group_ids: Vec<String>,
    pub tags: Vec<Tag>,
}

impl std::fmt::Debug for CreateReplicationGroupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateReplicationGroupRequest")
            .field("id", &self.id)
            .field("subnet_group_name", &self.subnet_group_name)
            .field("parameter_group_name", &self.parameter_group_name)
            .field("cache_node_type", &self.cache_node_type)
            .field("num_cache_clusters", &self.num_cache_clusters)
            .field("num_node_groups", &self.num_node_groups)
            .field("cluster_mode", &self.cluster_mode)
            .field("engine", &self.engine)
            .field("engine_version", &self.engine_version)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("transit_encryption_enabled", &self.transit_encryption_enabled)
            .finish_non_exhaustive()
    }
}

/// `ModifyReplicationGroup` call; every `None` field is omitted from the request
#[derive(Clone)]
pub struct ModifyReplicationGroupRequest {
    pub id: String,
    pub apply_immediately: bool,
    pub cache_node_type: Option<String>,
    pub engine_version: Option<String>,
    pub auto_minor_version_upgrade: Option<bool>,
    pub preferred_maintenance_window: Option<String>,
    pub transit_encryption_enabled: Option<bool>,
    pub transit_encryption_mode: Option<TransitEncryptionMode>,
    pub auth_token: Option<Zeroizing<String>>,
    pub auth_token_update_strategy: Option<AuthTokenUpdateStrategy>,
    pub user_group_ids_to_add: Option<Vec<String>>,
    pub user_group_ids_to_remove: Option<Vec<String>>,
}

impl std::fmt::Debug for ModifyReplicationGroupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifyReplicationGroupRequest")
            .field("id", &self.id)
            .field("apply_immediately", &self.apply_immediately)
            .field("cache_node_type", &self.cache_node_type)
            .field("engine_version", &self.engine_version)
            .field("auto_minor_version_upgrade", &self.auto_minor_version_upgrade)
            .field(
                "preferred_maintenance_window",
                &self.preferred_maintenance_window,
            )
            .field("transit_encryption_enabled", &self.transit_encryption_enabled)
            .field("transit_encryption_mode", &self.transit_encryption_mode)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("auth_token_update_strategy", &self.auth_token_update_strategy)
            .field("user_group_ids_to_add", &self.user_group_ids_to_add)
            .field("user_group_ids_to_remove", &self.user_group_ids_to_remove)
            .finish()
    }
}
