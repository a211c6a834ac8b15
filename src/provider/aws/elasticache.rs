//! # AWS ElastiCache
//!
//! [`ElastiCacheApi`] on top of `aws-sdk-elasticache`.

use super::{empty_response, non_empty, observe, owned, remote_error, to_chrono};
use crate::constants::SERVICE_ELASTICACHE;
use crate::error::Result;
use crate::provider::{
    CreateParameterGroupRequest, CreateReplicationGroupRequest, CreateSubnetGroupRequest,
    CreateUserGroupRequest, ElastiCacheApi, ModifyParameterGroupRequest,
    ModifyReplicationGroupRequest,
};
use crate::types::{
    AuthTokenUpdateStrategy, CacheClusterNode, ClusterMode, Endpoint, Page, Parameter,
    ParameterGroup, ParameterSource, ReplicationGroup, SubnetGroup, Tag, TransitEncryptionMode,
    UserGroup,
};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_elasticache::types as sdk;
use aws_sdk_elasticache::Client as ElastiCacheClient;
use tracing::{debug_span, Instrument};

/// ElastiCache API client
pub struct AwsElastiCache {
    client: ElastiCacheClient,
}

impl std::fmt::Debug for AwsElastiCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsElastiCache").finish_non_exhaustive()
    }
}

impl AwsElastiCache {
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(ElastiCacheClient::new(sdk_config))
    }

    #[must_use]
    pub fn from_client(client: ElastiCacheClient) -> Self {
        Self { client }
    }
}

fn sdk_tags(tags: &[Tag]) -> Vec<sdk::Tag> {
    tags.iter()
        .map(|tag| sdk::Tag::builder().key(&tag.key).value(&tag.value).build())
        .collect()
}

fn cluster_mode_to_sdk(mode: ClusterMode) -> sdk::ClusterMode {
    match mode {
        ClusterMode::Enabled => sdk::ClusterMode::Enabled,
        ClusterMode::Disabled => sdk::ClusterMode::Disabled,
        ClusterMode::Compatible => sdk::ClusterMode::Compatible,
    }
}

fn cluster_mode_from_sdk(mode: &sdk::ClusterMode) -> Option<ClusterMode> {
    match mode {
        sdk::ClusterMode::Enabled => Some(ClusterMode::Enabled),
        sdk::ClusterMode::Disabled => Some(ClusterMode::Disabled),
        sdk::ClusterMode::Compatible => Some(ClusterMode::Compatible),
        _ => None,
    }
}

fn transit_mode_to_sdk(mode: TransitEncryptionMode) -> sdk::TransitEncryptionMode {
    match mode {
        TransitEncryptionMode::Preferred => sdk::TransitEncryptionMode::Preferred,
        TransitEncryptionMode::Required => sdk::TransitEncryptionMode::Required,
    }
}

fn transit_mode_from_sdk(mode: &sdk::TransitEncryptionMode) -> Option<TransitEncryptionMode> {
    match mode {
        sdk::TransitEncryptionMode::Preferred => Some(TransitEncryptionMode::Preferred),
        sdk::TransitEncryptionMode::Required => Some(TransitEncryptionMode::Required),
        _ => None,
    }
}

fn auth_strategy_to_sdk(strategy: AuthTokenUpdateStrategy) -> sdk::AuthTokenUpdateStrategyType {
    match strategy {
        AuthTokenUpdateStrategy::Set => sdk::AuthTokenUpdateStrategyType::Set,
        AuthTokenUpdateStrategy::Rotate => sdk::AuthTokenUpdateStrategyType::Rotate,
        AuthTokenUpdateStrategy::Delete => sdk::AuthTokenUpdateStrategyType::Delete,
    }
}

fn subnet_group_from_sdk(group: &sdk::CacheSubnetGroup) -> SubnetGroup {
    SubnetGroup {
        name: group.cache_subnet_group_name().unwrap_or_default().to_string(),
        description: owned(group.cache_subnet_group_description()),
        vpc_id: owned(group.vpc_id()),
        subnet_ids: group
            .subnets()
            .iter()
            .filter_map(|subnet| owned(subnet.subnet_identifier()))
            .collect(),
        arn: owned(group.arn()),
    }
}

fn parameter_group_from_sdk(group: &sdk::CacheParameterGroup) -> ParameterGroup {
    ParameterGroup {
        name: group.cache_parameter_group_name().unwrap_or_default().to_string(),
        family: group
            .cache_parameter_group_family()
            .unwrap_or_default()
            .to_string(),
        description: owned(group.description()),
        is_global: group.is_global().unwrap_or(false),
        arn: owned(group.arn()),
    }
}

fn parameter_from_sdk(parameter: &sdk::Parameter) -> Parameter {
    Parameter {
        name: parameter.parameter_name().unwrap_or_default().to_string(),
        value: owned(parameter.parameter_value()),
        source: parameter.source().map(ParameterSource::from),
        data_type: owned(parameter.data_type()),
        allowed_values: owned(parameter.allowed_values()),
        is_modifiable: parameter.is_modifiable(),
        minimum_engine_version: owned(parameter.minimum_engine_version()),
        description: owned(parameter.description()),
    }
}

fn replication_group_from_sdk(group: &sdk::ReplicationGroup) -> ReplicationGroup {
    let primary_endpoint = group
        .node_groups()
        .first()
        .and_then(sdk::NodeGroup::primary_endpoint)
        .and_then(|endpoint| {
            endpoint.address().map(|address| Endpoint {
                address: address.to_string(),
                port: endpoint.port(),
            })
        });

    ReplicationGroup {
        id: group.replication_group_id().unwrap_or_default().to_string(),
        description: owned(group.description()),
        status: owned(group.status()),
        member_clusters: group.member_clusters().to_vec(),
        primary_endpoint,
        cache_node_type: owned(group.cache_node_type()),
        cluster_mode: group.cluster_mode().and_then(cluster_mode_from_sdk),
        auto_minor_version_upgrade: group.auto_minor_version_upgrade(),
        transit_encryption_enabled: group.transit_encryption_enabled(),
        transit_encryption_mode: group
            .transit_encryption_mode()
            .and_then(transit_mode_from_sdk),
        auth_token_enabled: group.auth_token_enabled(),
        user_group_ids: group.user_group_ids().to_vec(),
        arn: owned(group.arn()),
        created_at: group.replication_group_create_time().and_then(to_chrono),
    }
}

fn cache_cluster_from_sdk(cluster: &sdk::CacheCluster) -> CacheClusterNode {
    CacheClusterNode {
        id: cluster.cache_cluster_id().unwrap_or_default().to_string(),
        status: owned(cluster.cache_cluster_status()),
        replication_group_id: owned(cluster.replication_group_id()),
        cache_node_type: owned(cluster.cache_node_type()),
        engine: owned(cluster.engine()),
        engine_version: owned(cluster.engine_version()),
        parameter_group_name: cluster
            .cache_parameter_group()
            .and_then(|group| owned(group.cache_parameter_group_name())),
        subnet_group_name: owned(cluster.cache_subnet_group_name()),
        preferred_maintenance_window: owned(cluster.preferred_maintenance_window()),
        auto_minor_version_upgrade: cluster.auto_minor_version_upgrade(),
        transit_encryption_enabled: cluster.transit_encryption_enabled(),
        num_cache_nodes: cluster.num_cache_nodes(),
    }
}

fn user_group_from_sdk(group: &sdk::UserGroup) -> UserGroup {
    UserGroup {
        id: group.user_group_id().unwrap_or_default().to_string(),
        status: owned(group.status()),
        engine: owned(group.engine()),
        user_ids: group.user_ids().to_vec(),
        replication_groups: group.replication_groups().to_vec(),
        arn: owned(group.arn()),
    }
}

#[async_trait]
impl ElastiCacheApi for AwsElastiCache {
    async fn describe_cache_subnet_groups(&self, name: &str) -> Result<Vec<SubnetGroup>> {
        const OPERATION: &str = "DescribeCacheSubnetGroups";
        let span = debug_span!("elasticache.describe_cache_subnet_groups", subnet_group = name);
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .describe_cache_subnet_groups()
                .cache_subnet_group_name(name)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(out
                .cache_subnet_groups()
                .iter()
                .map(subnet_group_from_sdk)
                .collect())
        })
        .instrument(span)
        .await
    }

    async fn create_cache_subnet_group(
        &self,
        request: &CreateSubnetGroupRequest,
    ) -> Result<SubnetGroup> {
        const OPERATION: &str = "CreateCacheSubnetGroup";
        let span = debug_span!(
            "elasticache.create_cache_subnet_group",
            subnet_group = %request.name,
            subnets = request.subnet_ids.len()
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .create_cache_subnet_group()
                .cache_subnet_group_name(&request.name)
                .cache_subnet_group_description(&request.description)
                .set_subnet_ids(Some(request.subnet_ids.clone()))
                .set_tags(non_empty(&sdk_tags(&request.tags)))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            out.cache_subnet_group()
                .map(subnet_group_from_sdk)
                .ok_or_else(|| empty_response(SERVICE_ELASTICACHE, OPERATION, "CacheSubnetGroup"))
        })
        .instrument(span)
        .await
    }

    async fn delete_cache_subnet_group(&self, name: &str) -> Result<()> {
        const OPERATION: &str = "DeleteCacheSubnetGroup";
        let span = debug_span!("elasticache.delete_cache_subnet_group", subnet_group = name);
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            self.client
                .delete_cache_subnet_group()
                .cache_subnet_group_name(name)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }

    async fn describe_cache_parameter_groups(&self, name: &str) -> Result<Vec<ParameterGroup>> {
        const OPERATION: &str = "DescribeCacheParameterGroups";
        let span = debug_span!(
            "elasticache.describe_cache_parameter_groups",
            parameter_group = name
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .describe_cache_parameter_groups()
                .cache_parameter_group_name(name)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(out
                .cache_parameter_groups()
                .iter()
                .map(parameter_group_from_sdk)
                .collect())
        })
        .instrument(span)
        .await
    }

    async fn create_cache_parameter_group(
        &self,
        request: &CreateParameterGroupRequest,
    ) -> Result<ParameterGroup> {
        const OPERATION: &str = "CreateCacheParameterGroup";
        let span = debug_span!(
            "elasticache.create_cache_parameter_group",
            parameter_group = %request.name,
            family = %request.family
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .create_cache_parameter_group()
                .cache_parameter_group_name(&request.name)
                .cache_parameter_group_family(&request.family)
                .description(&request.description)
                .set_tags(non_empty(&sdk_tags(&request.tags)))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            out.cache_parameter_group()
                .map(parameter_group_from_sdk)
                .ok_or_else(|| {
                    empty_response(SERVICE_ELASTICACHE, OPERATION, "CacheParameterGroup")
                })
        })
        .instrument(span)
        .await
    }

    async fn delete_cache_parameter_group(&self, name: &str) -> Result<()> {
        const OPERATION: &str = "DeleteCacheParameterGroup";
        let span = debug_span!(
            "elasticache.delete_cache_parameter_group",
            parameter_group = name
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            self.client
                .delete_cache_parameter_group()
                .cache_parameter_group_name(name)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }

    async fn describe_cache_parameters(
        &self,
        group_name: &str,
        marker: Option<&str>,
        max_records: i32,
    ) -> Result<Page<Parameter>> {
        const OPERATION: &str = "DescribeCacheParameters";
        let span = debug_span!(
            "elasticache.describe_cache_parameters",
            parameter_group = group_name,
            marker = marker.unwrap_or_default(),
            max_records
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .describe_cache_parameters()
                .cache_parameter_group_name(group_name)
                .set_marker(owned(marker))
                .max_records(max_records)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(Page {
                items: out.parameters().iter().map(parameter_from_sdk).collect(),
                marker: owned(out.marker()),
            })
        })
        .instrument(span)
        .await
    }

    async fn modify_cache_parameter_group(
        &self,
        request: &ModifyParameterGroupRequest,
    ) -> Result<()> {
        const OPERATION: &str = "ModifyCacheParameterGroup";
        let span = debug_span!(
            "elasticache.modify_cache_parameter_group",
            parameter_group = %request.name,
            parameters = request.parameters.len()
        );
        let parameters = request
            .parameters
            .iter()
            .map(|p| {
                sdk::ParameterNameValue::builder()
                    .parameter_name(&p.name)
                    .parameter_value(&p.value)
                    .build()
            })
            .collect::<Vec<_>>();
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            self.client
                .modify_cache_parameter_group()
                .cache_parameter_group_name(&request.name)
                .set_parameter_name_values(Some(parameters))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }

    async fn describe_engine_default_parameters(
        &self,
        family: &str,
        marker: Option<&str>,
    ) -> Result<Page<Parameter>> {
        const OPERATION: &str = "DescribeEngineDefaultParameters";
        let span = debug_span!(
            "elasticache.describe_engine_default_parameters",
            family,
            marker = marker.unwrap_or_default()
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .describe_engine_default_parameters()
                .cache_parameter_group_family(family)
                .set_marker(owned(marker))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            let defaults = out
                .engine_defaults()
                .ok_or_else(|| empty_response(SERVICE_ELASTICACHE, OPERATION, "EngineDefaults"))?;
            Ok(Page {
                items: defaults.parameters().iter().map(parameter_from_sdk).collect(),
                marker: owned(defaults.marker()),
            })
        })
        .instrument(span)
        .await
    }

    async fn describe_replication_groups(&self, id: &str) -> Result<Vec<ReplicationGroup>> {
        const OPERATION: &str = "DescribeReplicationGroups";
        let span = debug_span!(
            "elasticache.describe_replication_groups",
            replication_group = id
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .describe_replication_groups()
                .replication_group_id(id)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(out
                .replication_groups()
                .iter()
                .map(replication_group_from_sdk)
                .collect())
        })
        .instrument(span)
        .await
    }

    async fn create_replication_group(
        &self,
        request: &CreateReplicationGroupRequest,
    ) -> Result<ReplicationGroup> {
        const OPERATION: &str = "CreateReplicationGroup";
        let span = debug_span!(
            "elasticache.create_replication_group",
            replication_group = %request.id,
            node_type = %request.cache_node_type,
            engine_version = %request.engine_version
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .create_replication_group()
                .replication_group_id(&request.id)
                .replication_group_description(&request.description)
                .cache_subnet_group_name(&request.subnet_group_name)
                .cache_parameter_group_name(&request.parameter_group_name)
                .cache_node_type(&request.cache_node_type)
                .num_cache_clusters(request.num_cache_clusters)
                .num_node_groups(request.num_node_groups)
                .cluster_mode(cluster_mode_to_sdk(request.cluster_mode))
                .engine(&request.engine)
                .engine_version(&request.engine_version)
                .auto_minor_version_upgrade(request.auto_minor_version_upgrade)
                .set_auth_token(request.auth_token.as_deref().cloned())
                .transit_encryption_enabled(request.transit_encryption_enabled)
                .set_preferred_maintenance_window(request.preferred_maintenance_window.clone())
                .set_security_group_ids(non_empty(&request.security_group_ids))
                .set_tags(non_empty(&sdk_tags(&request.tags)))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            out.replication_group()
                .map(replication_group_from_sdk)
                .ok_or_else(|| empty_response(SERVICE_ELASTICACHE, OPERATION, "ReplicationGroup"))
        })
        .instrument(span)
        .await
    }

    async fn modify_replication_group(
        &self,
        request: &ModifyReplicationGroupRequest,
    ) -> Result<ReplicationGroup> {
        const OPERATION: &str = "ModifyReplicationGroup";
        let span = debug_span!(
            "elasticache.modify_replication_group",
            replication_group = %request.id,
            apply_immediately = request.apply_immediately
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .modify_replication_group()
                .replication_group_id(&request.id)
                .apply_immediately(request.apply_immediately)
                .set_cache_node_type(request.cache_node_type.clone())
                .set_engine_version(request.engine_version.clone())
                .set_auto_minor_version_upgrade(request.auto_minor_version_upgrade)
                .set_preferred_maintenance_window(request.preferred_maintenance_window.clone())
                .set_transit_encryption_enabled(request.transit_encryption_enabled)
                .set_transit_encryption_mode(
                    request.transit_encryption_mode.map(transit_mode_to_sdk),
                )
                .set_auth_token(request.auth_token.as_deref().cloned())
                .set_auth_token_update_strategy(
                    request.auth_token_update_strategy.map(auth_strategy_to_sdk),
                )
                .set_user_group_ids_to_add(request.user_group_ids_to_add.clone())
                .set_user_group_ids_to_remove(request.user_group_ids_to_remove.clone())
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            out.replication_group()
                .map(replication_group_from_sdk)
                .ok_or_else(|| empty_response(SERVICE_ELASTICACHE, OPERATION, "ReplicationGroup"))
        })
        .instrument(span)
        .await
    }

    async fn delete_replication_group(
        &self,
        id: &str,
        retain_primary_cluster: bool,
    ) -> Result<()> {
        const OPERATION: &str = "DeleteReplicationGroup";
        let span = debug_span!(
            "elasticache.delete_replication_group",
            replication_group = id,
            retain_primary_cluster
        );
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            self.client
                .delete_replication_group()
                .replication_group_id(id)
                .retain_primary_cluster(retain_primary_cluster)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }

    async fn describe_cache_clusters(&self, id: &str) -> Result<Vec<CacheClusterNode>> {
        const OPERATION: &str = "DescribeCacheClusters";
        let span = debug_span!("elasticache.describe_cache_clusters", cache_cluster = id);
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .describe_cache_clusters()
                .cache_cluster_id(id)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(out
                .cache_clusters()
                .iter()
                .map(cache_cluster_from_sdk)
                .collect())
        })
        .instrument(span)
        .await
    }

    async fn describe_user_groups(&self, id: &str) -> Result<Vec<UserGroup>> {
        const OPERATION: &str = "DescribeUserGroups";
        let span = debug_span!("elasticache.describe_user_groups", user_group = id);
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .describe_user_groups()
                .user_group_id(id)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(out.user_groups().iter().map(user_group_from_sdk).collect())
        })
        .instrument(span)
        .await
    }

    async fn create_user_group(&self, request: &CreateUserGroupRequest) -> Result<UserGroup> {
        const OPERATION: &str = "CreateUserGroup";
        let span = debug_span!("elasticache.create_user_group", user_group = %request.id);
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            let out = self
                .client
                .create_user_group()
                .user_group_id(&request.id)
                .engine(&request.engine)
                .set_user_ids(Some(request.user_ids.clone()))
                .set_tags(non_empty(&sdk_tags(&request.tags)))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(UserGroup {
                id: out.user_group_id().unwrap_or(&request.id).to_string(),
                status: owned(out.status()),
                engine: owned(out.engine()),
                user_ids: out.user_ids().to_vec(),
                replication_groups: out.replication_groups().to_vec(),
                arn: owned(out.arn()),
            })
        })
        .instrument(span)
        .await
    }

    async fn delete_user_group(&self, id: &str) -> Result<()> {
        const OPERATION: &str = "DeleteUserGroup";
        let span = debug_span!("elasticache.delete_user_group", user_group = id);
        observe(SERVICE_ELASTICACHE, OPERATION, async {
            self.client
                .delete_user_group()
                .user_group_id(id)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_ELASTICACHE, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }
}
