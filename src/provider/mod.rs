//! # Provider Modules
//!
//! Request-level interfaces to the three remote services a replication group
//! depends on. Each method issues exactly one remote request and reports the
//! provider's answer unchanged: no pagination, retries or not-found handling
//! happen at this layer. Those belong to the managers in [`crate::manager`].
//!
//! - `ElastiCacheApi` - subnet groups, parameter groups, replication groups,
//!   cache clusters and user groups
//! - `Ec2Api` - security groups
//! - `SecretsManagerApi` - the auth-token secret
//!
//! [`aws`] implements all three on top of the AWS SDK; tests substitute fakes.

use crate::error::Result;
use crate::types::{
    CacheClusterNode, Filter, IpPermission, Page, Parameter, ParameterGroup, ReplicationGroup,
    SecretValue, SecurityGroup, SubnetGroup, UserGroup,
};
use async_trait::async_trait;

pub mod aws;
pub mod requests;

pub use requests::{
    CreateParameterGroupRequest, CreateReplicationGroupRequest, CreateSecretRequest,
    CreateSecurityGroupRequest, CreateSubnetGroupRequest, CreateUserGroupRequest,
    ModifyParameterGroupRequest, ModifyReplicationGroupRequest,
};

#[async_trait]
pub trait ElastiCacheApi: Send + Sync {
    async fn describe_cache_subnet_groups(&self, name: &str) -> Result<Vec<SubnetGroup>>;

    async fn create_cache_subnet_group(
        &self,
        request: &CreateSubnetGroupRequest,
    ) -> Result<SubnetGroup>;

    async fn delete_cache_subnet_group(&self, name: &str) -> Result<()>;

    async fn describe_cache_parameter_groups(&self, name: &str) -> Result<Vec<ParameterGroup>>;

    async fn create_cache_parameter_group(
        &self,
        request: &CreateParameterGroupRequest,
    ) -> Result<ParameterGroup>;

    async fn delete_cache_parameter_group(&self, name: &str) -> Result<()>;

    /// One page of a parameter group's parameters
    async fn describe_cache_parameters(
        &self,
        group_name: &str,
        marker: Option<&str>,
        max_records: i32,
    ) -> Result<Page<Parameter>>;

    /// Submit one batch of overrides; callers keep batches within the API limit
    async fn modify_cache_parameter_group(&self, request: &ModifyParameterGroupRequest)
        -> Result<()>;

    /// One page of the engine defaults for a family
    async fn describe_engine_default_parameters(
        &self,
        family: &str,
        marker: Option<&str>,
    ) -> Result<Page<Parameter>>;

    async fn describe_replication_groups(&self, id: &str) -> Result<Vec<ReplicationGroup>>;

    async fn create_replication_group(
        &self,
        request: &CreateReplicationGroupRequest,
    ) -> Result<ReplicationGroup>;

    async fn modify_replication_group(
        &self,
        request: &ModifyReplicationGroupRequest,
    ) -> Result<ReplicationGroup>;

    async fn delete_replication_group(&self, id: &str, retain_primary_cluster: bool)
        -> Result<()>;

    async fn describe_cache_clusters(&self, id: &str) -> Result<Vec<CacheClusterNode>>;

    async fn describe_user_groups(&self, id: &str) -> Result<Vec<UserGroup>>;

    async fn create_user_group(&self, request: &CreateUserGroupRequest) -> Result<UserGroup>;

    async fn delete_user_group(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait Ec2Api: Send + Sync {
    /// Empty `filters`/`group_ids` are omitted from the request
    async fn describe_security_groups(
        &self,
        filters: &[Filter],
        group_ids: &[String],
    ) -> Result<Vec<SecurityGroup>>;

    /// Returns the id assigned to the new group
    async fn create_security_group(&self, request: &CreateSecurityGroupRequest) -> Result<String>;

    async fn delete_security_group(&self, id: &str) -> Result<()>;

    async fn authorize_security_group_ingress(
        &self,
        id: &str,
        permissions: &[IpPermission],
    ) -> Result<()>;
}

#[async_trait]
pub trait SecretsManagerApi: Send + Sync {
    async fn get_secret_value(&self, name: &str) -> Result<SecretValue>;

    async fn create_secret(&self, request: &CreateSecretRequest) -> Result<()>;

    async fn delete_secret(&self, name: &str, force_delete_without_recovery: bool) -> Result<()>;
}
