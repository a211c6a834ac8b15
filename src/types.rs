//! # Types
//!
//! Provider-neutral data model for the resources a replication group is built from.
//!
//! The AWS implementations in [`crate::provider::aws`] translate SDK shapes into
//! these types, so managers and tests never touch SDK structs directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Key/value tag attached to a created resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation cursor; `None` on the last page
    pub marker: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            marker: None,
        }
    }

    pub fn with_marker(items: Vec<T>, marker: impl Into<String>) -> Self {
        Self {
            items,
            marker: Some(marker.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetGroup {
    pub name: String,
    pub description: Option<String>,
    pub vpc_id: Option<String>,
    pub subnet_ids: Vec<String>,
    pub arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterGroup {
    pub name: String,
    /// Engine version family, e.g. `redis7`
    pub family: String,
    pub description: Option<String>,
    pub is_global: bool,
    pub arn: Option<String>,
}

/// Where a parameter's current value comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterSource {
    /// Published engine default
    EngineDefault,
    /// Set by the provider for this group
    System,
    /// Explicitly overridden in the group
    User,
    Other(String),
}

impl From<&str> for ParameterSource {
    fn from(value: &str) -> Self {
        match value {
            "engine-default" | "default" => ParameterSource::EngineDefault,
            "system" => ParameterSource::System,
            "user" => ParameterSource::User,
            other => ParameterSource::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub value: Option<String>,
    pub source: Option<ParameterSource>,
    pub data_type: Option<String>,
    pub allowed_values: Option<String>,
    pub is_modifiable: Option<bool>,
    pub minimum_engine_version: Option<String>,
    pub description: Option<String>,
}

impl Parameter {
    /// Parameter carrying only a name and a value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            source: None,
            data_type: None,
            allowed_values: None,
            is_modifiable: None,
            minimum_engine_version: None,
            description: None,
        }
    }

    #[must_use]
    pub fn is_user_defined(&self) -> bool {
        self.source == Some(ParameterSource::User)
    }
}

/// Parameter override submitted to a parameter group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterNameValue {
    pub name: String,
    pub value: String,
}

impl ParameterNameValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Fails for a parameter without a value; the provider rejects empty overrides
impl TryFrom<&Parameter> for ParameterNameValue {
    type Error = crate::error::Error;

    fn try_from(parameter: &Parameter) -> Result<Self, Self::Error> {
        let value = parameter
            .value
            .clone()
            .ok_or_else(|| crate::error::Error::MissingParameterValue(parameter.name.clone()))?;
        Ok(Self {
            name: parameter.name.clone(),
            value,
        })
    }
}

/// Provider-side filter predicate for security group lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRange {
    pub cidr: String,
    pub description: Option<String>,
}

/// Reference to another security group as an ingress source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupReference {
    pub group_id: String,
    pub description: Option<String>,
}

/// Ingress permission rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpPermission {
    /// `tcp`, `udp`, `icmp` or `-1` for all
    pub protocol: String,
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    pub ip_ranges: Vec<IpRange>,
    pub source_groups: Vec<SecurityGroupReference>,
}

impl IpPermission {
    /// TCP rule for a single port open to the given CIDR blocks
    pub fn tcp_port<I, S>(port: i32, cidrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protocol: "tcp".to_string(),
            from_port: Some(port),
            to_port: Some(port),
            ip_ranges: cidrs
                .into_iter()
                .map(|cidr| IpRange {
                    cidr: cidr.into(),
                    description: None,
                })
                .collect(),
            source_groups: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroup {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub vpc_id: Option<String>,
    pub ingress: Vec<IpPermission>,
    pub tags: Vec<Tag>,
}

/// Secret holding a replication group's auth token
#[derive(Clone)]
pub struct SecretValue {
    pub name: Option<String>,
    pub arn: Option<String>,
    pub version_id: Option<String>,
    pub secret_string: Option<Zeroizing<String>>,
}

impl SecretValue {
    /// The token, if the secret stores a string value
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.secret_string.as_deref().map(String::as_str)
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretValue")
            .field("name", &self.name)
            .field("arn", &self.arn)
            .field("version_id", &self.version_id)
            .field("secret_string", &self.secret_string.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id: String,
    pub status: Option<String>,
    pub engine: Option<String>,
    pub user_ids: Vec<String>,
    pub replication_groups: Vec<String>,
    pub arn: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMode {
    Enabled,
    Disabled,
    Compatible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitEncryptionMode {
    Preferred,
    Required,
}

/// How `ModifyReplicationGroup` treats the auth token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthTokenUpdateStrategy {
    Set,
    Rotate,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub address: String,
    pub port: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationGroup {
    pub id: String,
    pub description: Option<String>,
    /// Provider lifecycle status: `creating`, `available`, `modifying`, `deleting`, ...
    pub status: Option<String>,
    pub member_clusters: Vec<String>,
    pub primary_endpoint: Option<Endpoint>,
    pub cache_node_type: Option<String>,
    pub cluster_mode: Option<ClusterMode>,
    pub auto_minor_version_upgrade: Option<bool>,
    pub transit_encryption_enabled: Option<bool>,
    pub transit_encryption_mode: Option<TransitEncryptionMode>,
    pub auth_token_enabled: Option<bool>,
    pub user_group_ids: Vec<String>,
    pub arn: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A cache cluster (node) belonging to a replication group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheClusterNode {
    pub id: String,
    pub status: Option<String>,
    pub replication_group_id: Option<String>,
    pub cache_node_type: Option<String>,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub parameter_group_name: Option<String>,
    pub subnet_group_name: Option<String>,
    pub preferred_maintenance_window: Option<String>,
    pub auto_minor_version_upgrade: Option<bool>,
    pub transit_encryption_enabled: Option<bool>,
    pub num_cache_nodes: Option<i32>,
}

/// Fully specified replication group to create
#[derive(Clone, Default)]
pub struct CreateReplicationGroupOptions {
    pub name: String,
    pub subnet_group_name: String,
    pub parameter_group_name: String,
    pub cache_node_type: String,
    pub engine_version: String,
    pub auto_minor_version_upgrade: bool,
    pub auth_token: Option<Zeroizing<String>>,
    pub transit_encryption_enabled: bool,
    pub preferred_maintenance_window: Option<String>,
    pub security_group_ids: Vec<String>,
}

impl std::fmt::Debug for CreateReplicationGroupOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateReplicationGroupOptions")
            .field("name", &self.name)
            .field("subnet_group_name", &self.subnet_group_name)
            .field("parameter_group_name", &self.parameter_group_name)
            .field("cache_node_type", &self.cache_node_type)
            .field("engine_version", &self.engine_version)
            .field("auto_minor_version_upgrade", &self.auto_minor_version_upgrade)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("transit_encryption_enabled", &self.transit_encryption_enabled)
            .field(
                "preferred_maintenance_window",
                &self.preferred_maintenance_window,
            )
            .field("security_group_ids", &self.security_group_ids)
            .finish()
    }
}

/// Partial update of an existing replication group.
///
/// `None` means "leave untouched"; only `Some` fields reach the provider. Empty
/// user group id lists are treated like `None`.
#[derive(Clone, Default)]
pub struct ModifyReplicationGroupOptions {
    pub cache_node_type: Option<String>,
    pub engine_version: Option<String>,
    pub auto_minor_version_upgrade: Option<bool>,
    pub preferred_maintenance_window: Option<String>,
    pub transit_encryption_enabled: Option<bool>,
    pub transit_encryption_mode: Option<TransitEncryptionMode>,
    pub auth_token: Option<Zeroizing<String>>,
    pub auth_token_update_strategy: Option<AuthTokenUpdateStrategy>,
    pub user_group_ids_to_add: Vec<String>,
    pub user_group_ids_to_remove: Vec<String>,
}

impl ModifyReplicationGroupOptions {
    #[must_use]
    pub fn cache_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.cache_node_type = Some(node_type.into());
        self
    }

    #[must_use]
    pub fn engine_version(mut self, version: impl Into<String>) -> Self {
        self.engine_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn auto_minor_version_upgrade(mut self, enabled: bool) -> Self {
        self.auto_minor_version_upgrade = Some(enabled);
        self
    }

    #[must_use]
    pub fn preferred_maintenance_window(mut self, window: impl Into<String>) -> Self {
        self.preferred_maintenance_window = Some(window.into());
        self
    }

    #[must_use]
    pub fn transit_encryption_enabled(mut self, enabled: bool) -> Self {
        self.transit_encryption_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn transit_encryption_mode(mut self, mode: TransitEncryptionMode) -> Self {
        self.transit_encryption_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn auth_token(
        mut self,
        token: impl Into<String>,
        strategy: AuthTokenUpdateStrategy,
    ) -> Self {
        self.auth_token = Some(Zeroizing::new(token.into()));
        self.auth_token_update_strategy = Some(strategy);
        self
    }

    #[must_use]
    pub fn add_user_groups<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_group_ids_to_add.extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn remove_user_groups<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_group_ids_to_remove
            .extend(ids.into_iter().map(Into::into));
        self
    }
}

impl std::fmt::Debug for ModifyReplicationGroupOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifyReplicationGroupOptions")
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
