//! Common test utilities
//!
//! In-memory stand-ins for the ElastiCache, EC2 and Secrets Manager APIs. Each fake
//! keeps the resources it was asked to create, answers describes the way the real
//! services do (not-found errors included) and records every request so tests can
//! assert on what was sent.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use elasticache_provisioner::provider::{
    CreateParameterGroupRequest, CreateReplicationGroupRequest, CreateSecretRequest,
    CreateSecurityGroupRequest, CreateSubnetGroupRequest, CreateUserGroupRequest, Ec2Api,
    ElastiCacheApi, ModifyParameterGroupRequest, ModifyReplicationGroupRequest,
    SecretsManagerApi,
};
use elasticache_provisioner::types::{
    CacheClusterNode, Filter, IpPermission, Page, Parameter, ParameterGroup, ParameterSource,
    ReplicationGroup, SecretValue, SecurityGroup, SubnetGroup, UserGroup,
};
use elasticache_provisioner::{ElastiCacheClient, EngineDefaultsCache, Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Provider error as the SDK layer reports it
pub fn remote_error(service: &'static str, operation: &'static str, code: &str) -> Error {
    Error::Remote {
        service,
        operation,
        code: Some(code.to_string()),
        message: format!("{code} raised by fake"),
    }
}

/// Parameters `prefix-0`..`prefix-{count-1}` with engine-default source
pub fn numbered_parameters(prefix: &str, count: usize) -> Vec<Parameter> {
    (0..count)
        .map(|i| Parameter {
            source: Some(ParameterSource::EngineDefault),
            ..Parameter::new(format!("{prefix}-{i}"), i.to_string())
        })
        .collect()
}

/// One-shot failure: the operation succeeds `successes` more times, then fails once
#[derive(Debug, Clone)]
struct FailureRule {
    successes: usize,
    code: String,
}

#[derive(Debug, Default)]
struct Failures {
    rules: HashMap<&'static str, FailureRule>,
}

impl Failures {
    fn check(&mut self, service: &'static str, operation: &'static str) -> Result<()> {
        let Some(rule) = self.rules.get_mut(operation) else {
            return Ok(());
        };
        if rule.successes > 0 {
            rule.successes -= 1;
            return Ok(());
        }
        let code = rule.code.clone();
        self.rules.remove(operation);
        Err(remote_error(service, operation, &code))
    }
}

// ElastiCache

#[derive(Debug)]
pub struct ElastiCacheState {
    pub subnet_groups: HashMap<String, SubnetGroup>,
    pub parameter_groups: HashMap<String, ParameterGroup>,
    /// Parameters per parameter group, in listing order
    pub parameters: HashMap<String, Vec<Parameter>>,
    /// Engine defaults per family
    pub engine_defaults: HashMap<String, Vec<Parameter>>,
    /// Records per engine defaults page (the provider decides, not the caller)
    pub engine_defaults_page_size: usize,
    pub replication_groups: HashMap<String, ReplicationGroup>,
    pub cache_clusters: HashMap<String, Vec<CacheClusterNode>>,
    pub user_groups: HashMap<String, UserGroup>,
    /// Next user group lookup succeeds with an empty listing
    pub empty_user_groups: bool,

    /// Operation names in call order
    pub calls: Vec<&'static str>,
    pub describe_parameters_requests: Vec<(String, Option<String>, i32)>,
    pub engine_defaults_requests: Vec<(String, Option<String>)>,
    pub modify_parameter_requests: Vec<ModifyParameterGroupRequest>,
    pub create_subnet_group_requests: Vec<CreateSubnetGroupRequest>,
    pub create_parameter_group_requests: Vec<CreateParameterGroupRequest>,
    pub create_replication_group_requests: Vec<CreateReplicationGroupRequest>,
    pub modify_replication_group_requests: Vec<ModifyReplicationGroupRequest>,
    pub delete_replication_group_requests: Vec<(String, bool)>,
    pub create_user_group_requests: Vec<CreateUserGroupRequest>,

    failures: Failures,
}

impl Default for ElastiCacheState {
    fn default() -> Self {
        Self {
            subnet_groups: HashMap::new(),
            parameter_groups: HashMap::new(),
            parameters: HashMap::new(),
            engine_defaults: HashMap::new(),
            engine_defaults_page_size: 20,
            replication_groups: HashMap::new(),
            cache_clusters: HashMap::new(),
            user_groups: HashMap::new(),
            empty_user_groups: false,
            calls: Vec::new(),
            describe_parameters_requests: Vec::new(),
            engine_defaults_requests: Vec::new(),
            modify_parameter_requests: Vec::new(),
            create_subnet_group_requests: Vec::new(),
            create_parameter_group_requests: Vec::new(),
            create_replication_group_requests: Vec::new(),
            modify_replication_group_requests: Vec::new(),
            delete_replication_group_requests: Vec::new(),
            create_user_group_requests: Vec::new(),
            failures: Failures::default(),
        }
    }
}

impl ElastiCacheState {
    fn begin(&mut self, operation: &'static str) -> Result<()> {
        self.calls.push(operation);
        self.failures.check("elasticache", operation)
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls.iter().filter(|c| **c == operation).count()
    }
}

#[derive(Debug, Default)]
pub struct FakeElastiCache {
    state: Mutex<ElastiCacheState>,
}

impl FakeElastiCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, ElastiCacheState> {
        self.state.lock().unwrap()
    }

    /// Let `operation` succeed `successes` more times, then fail once with `code`
    pub fn fail_after(&self, operation: &'static str, successes: usize, code: &str) {
        self.state().failures.rules.insert(
            operation,
            FailureRule {
                successes,
                code: code.to_string(),
            },
        );
    }

    pub fn with_engine_defaults(self, family: &str, parameters: Vec<Parameter>) -> Self {
        self.state()
            .engine_defaults
            .insert(family.to_string(), parameters);
        self
    }

    pub fn with_cache_cluster(self, node: CacheClusterNode) -> Self {
        self.state()
            .cache_clusters
            .entry(node.id.clone())
            .or_default()
            .push(node);
        self
    }
}

fn page_of(items: &[Parameter], marker: Option<&str>, size: usize) -> Page<Parameter> {
    let start = marker.map_or(0, |m| m.parse::<usize>().unwrap());
    let end = (start + size).min(items.len());
    let page = items[start..end].to_vec();
    if end < items.len() {
        Page::with_marker(page, end.to_string())
    } else {
        Page::last(page)
    }
}

fn replication_group_from(request: &CreateReplicationGroupRequest) -> ReplicationGroup {
    ReplicationGroup {
        id: request.id.clone(),
        description: Some(request.description.clone()),
        status: Some("creating".to_string()),
        member_clusters: vec![format!("{}-001", request.id)],
        primary_endpoint: None,
        cache_node_type: Some(request.cache_node_type.clone()),
        cluster_mode: Some(request.cluster_mode),
        auto_minor_version_upgrade: Some(request.auto_minor_version_upgrade),
        transit_encryption_enabled: Some(request.transit_encryption_enabled),
        transit_encryption_mode: None,
        auth_token_enabled: Some(request.auth_token.is_some()),
        user_group_ids: Vec::new(),
        arn: Some(format!(
            "arn:aws:elasticache:us-east-1:000000000000:replicationgroup:{}",
            request.id
        )),
        created_at: None,
    }
}

#[async_trait]
impl ElastiCacheApi for FakeElastiCache {
    async fn describe_cache_subnet_groups(&self, name: &str) -> Result<Vec<SubnetGroup>> {
        let mut state = self.state();
        state.begin("DescribeCacheSubnetGroups")?;
        state
            .subnet_groups
            .get(name)
            .cloned()
            .map(|group| vec![group])
            .ok_or_else(|| {
                remote_error(
                    "elasticache",
                    "DescribeCacheSubnetGroups",
                    "CacheSubnetGroupNotFoundFault",
                )
            })
    }

    async fn create_cache_subnet_group(
        &self,
        request: &CreateSubnetGroupRequest,
    ) -> Result<SubnetGroup> {
        let mut state = self.state();
        state.begin("CreateCacheSubnetGroup")?;
        state.create_subnet_group_requests.push(request.clone());
        if state.subnet_groups.contains_key(&request.name) {
            return Err(remote_error(
                "elasticache",
                "CreateCacheSubnetGroup",
                "CacheSubnetGroupAlreadyExists",
            ));
        }
        let group = SubnetGroup {
            name: request.name.clone(),
            description: Some(request.description.clone()),
            vpc_id: Some("vpc-fake".to_string()),
            subnet_ids: request.subnet_ids.clone(),
            arn: None,
        };
        state
            .subnet_groups
            .insert(request.name.clone(), group.clone());
        Ok(group)
    }

    async fn delete_cache_subnet_group(&self, name: &str) -> Result<()> {
        let mut state = self.state();
        state.begin("DeleteCacheSubnetGroup")?;
        state.subnet_groups.remove(name).map(|_| ()).ok_or_else(|| {
            remote_error(
                "elasticache",
                "DeleteCacheSubnetGroup",
                "CacheSubnetGroupNotFoundFault",
            )
        })
    }

    async fn describe_cache_parameter_groups(&self, name: &str) -> Result<Vec<ParameterGroup>> {
        let mut state = self.state();
        state.begin("DescribeCacheParameterGroups")?;
        state
            .parameter_groups
            .get(name)
            .cloned()
            .map(|group| vec![group])
            .ok_or_else(|| {
                remote_error(
                    "elasticache",
                    "DescribeCacheParameterGroups",
                    "CacheParameterGroupNotFound",
                )
            })
    }

    async fn create_cache_parameter_group(
        &self,
        request: &CreateParameterGroupRequest,
    ) -> Result<ParameterGroup> {
        let mut state = self.state();
        state.begin("CreateCacheParameterGroup")?;
        state.create_parameter_group_requests.push(request.clone());
        if state.parameter_groups.contains_key(&request.name) {
            return Err(remote_error(
                "elasticache",
                "CreateCacheParameterGroup",
                "CacheParameterGroupAlreadyExists",
            ));
        }
        let group = ParameterGroup {
            name: request.name.clone(),
            family: request.family.clone(),
            description: Some(request.description.clone()),
            is_global: false,
            arn: None,
        };
        let defaults = state
            .engine_defaults
            .get(&request.family)
            .cloned()
            .unwrap_or_default();
        state.parameters.insert(request.name.clone(), defaults);
        state
            .parameter_groups
            .insert(request.name.clone(), group.clone());
        Ok(group)
    }

    async fn delete_cache_parameter_group(&self, name: &str) -> Result<()> {
        let mut state = self.state();
        state.begin("DeleteCacheParameterGroup")?;
        state.parameters.remove(name);
        state.parameter_groups.remove(name).map(|_| ()).ok_or_else(|| {
            remote_error(
                "elasticache",
                "DeleteCacheParameterGroup",
                "CacheParameterGroupNotFound",
            )
        })
    }

    async fn describe_cache_parameters(
        &self,
        group_name: &str,
        marker: Option<&str>,
        max_records: i32,
    ) -> Result<Page<Parameter>> {
        let mut state = self.state();
        state.begin("DescribeCacheParameters")?;
        state.describe_parameters_requests.push((
            group_name.to_string(),
            marker.map(ToString::to_string),
            max_records,
        ));
        let parameters = state.parameters.get(group_name).ok_or_else(|| {
            remote_error(
                "elasticache",
                "DescribeCacheParameters",
                "CacheParameterGroupNotFound",
            )
        })?;
        Ok(page_of(
            parameters,
            marker,
            usize::try_from(max_records).unwrap(),
        ))
    }

    async fn modify_cache_parameter_group(
        &self,
        request: &ModifyParameterGroupRequest,
    ) -> Result<()> {
        let mut state = self.state();
        state.begin("ModifyCacheParameterGroup")?;
        state.modify_parameter_requests.push(request.clone());
        if request.parameters.len() > 20 {
            return Err(remote_error(
                "elasticache",
                "ModifyCacheParameterGroup",
                "InvalidParameterValue",
            ));
        }
        let parameters = state.parameters.get_mut(&request.name).ok_or_else(|| {
            remote_error(
                "elasticache",
                "ModifyCacheParameterGroup",
                "CacheParameterGroupNotFound",
            )
        })?;
        for update in &request.parameters {
            match parameters.iter_mut().find(|p| p.name == update.name) {
                Some(existing) => {
                    existing.value = Some(update.value.clone());
                    existing.source = Some(ParameterSource::User);
                }
                None => parameters.push(Parameter {
                    source: Some(ParameterSource::User),
                    ..Parameter::new(update.name.clone(), update.value.clone())
                }),
            }
        }
        Ok(())
    }

    async fn describe_engine_default_parameters(
        &self,
        family: &str,
        marker: Option<&str>,
    ) -> Result<Page<Parameter>> {
        let mut state = self.state();
        state.begin("DescribeEngineDefaultParameters")?;
        state
            .engine_defaults_requests
            .push((family.to_string(), marker.map(ToString::to_string)));
        let page_size = state.engine_defaults_page_size;
        let defaults = state.engine_defaults.get(family).ok_or_else(|| {
            remote_error(
                "elasticache",
                "DescribeEngineDefaultParameters",
                "InvalidParameterValue",
            )
        })?;
        Ok(page_of(defaults, marker, page_size))
    }

    async fn describe_replication_groups(&self, id: &str) -> Result<Vec<ReplicationGroup>> {
        let mut state = self.state();
        state.begin("DescribeReplicationGroups")?;
        state
            .replication_groups
            .get(id)
            .cloned()
            .map(|group| vec![group])
            .ok_or_else(|| {
                remote_error(
                    "elasticache",
                    "DescribeReplicationGroups",
                    "ReplicationGroupNotFoundFault",
                )
            })
    }

    async fn create_replication_group(
        &self,
        request: &CreateReplicationGroupRequest,
    ) -> Result<ReplicationGroup> {
        let mut state = self.state();
        state.begin("CreateReplicationGroup")?;
        state.create_replication_group_requests.push(request.clone());
        if state.replication_groups.contains_key(&request.id) {
            return Err(remote_error(
                "elasticache",
                "CreateReplicationGroup",
                "ReplicationGroupAlreadyExistsFault",
            ));
        }
        let group = replication_group_from(request);
        state
            .replication_groups
            .insert(request.id.clone(), group.clone());
        Ok(group)
    }

    async fn modify_replication_group(
        &self,
        request: &ModifyReplicationGroupRequest,
    ) -> Result<ReplicationGroup> {
        let mut state = self.state();
        state.begin("ModifyReplicationGroup")?;
        state.modify_replication_group_requests.push(request.clone());
        let group = state.replication_groups.get_mut(&request.id).ok_or_else(|| {
            remote_error(
                "elasticache",
                "ModifyReplicationGroup",
                "ReplicationGroupNotFoundFault",
            )
        })?;
        group.status = Some("modifying".to_string());
        if let Some(node_type) = &request.cache_node_type {
            group.cache_node_type = Some(node_type.clone());
        }
        if let Some(enabled) = request.auto_minor_version_upgrade {
            group.auto_minor_version_upgrade = Some(enabled);
        }
        if let Some(enabled) = request.transit_encryption_enabled {
            group.transit_encryption_enabled = Some(enabled);
        }
        if request.transit_encryption_mode.is_some() {
            group.transit_encryption_mode = request.transit_encryption_mode;
        }
        if let Some(added) = &request.user_group_ids_to_add {
            group.user_group_ids.extend(added.iter().cloned());
        }
        if let Some(removed) = &request.user_group_ids_to_remove {
            group.user_group_ids.retain(|id| !removed.contains(id));
        }
        Ok(group.clone())
    }

    async fn delete_replication_group(&self, id: &str, retain_primary_cluster: bool) -> Result<()> {
        let mut state = self.state();
        state.begin("DeleteReplicationGroup")?;
        state
            .delete_replication_group_requests
            .push((id.to_string(), retain_primary_cluster));
        state.replication_groups.remove(id).map(|_| ()).ok_or_else(|| {
            remote_error(
                "elasticache",
                "DeleteReplicationGroup",
                "ReplicationGroupNotFoundFault",
            )
        })
    }

    async fn describe_cache_clusters(&self, id: &str) -> Result<Vec<CacheClusterNode>> {
        let mut state = self.state();
        state.begin("DescribeCacheClusters")?;
        state.cache_clusters.get(id).cloned().ok_or_else(|| {
            remote_error(
                "elasticache",
                "DescribeCacheClusters",
                "CacheClusterNotFound",
            )
        })
    }

    async fn describe_user_groups(&self, id: &str) -> Result<Vec<UserGroup>> {
        let mut state = self.state();
        state.begin("DescribeUserGroups")?;
        if std::mem::take(&mut state.empty_user_groups) {
            return Ok(Vec::new());
        }
        state
            .user_groups
            .get(id)
            .cloned()
            .map(|group| vec![group])
            .ok_or_else(|| {
                remote_error("elasticache", "DescribeUserGroups", "UserGroupNotFound")
            })
    }

    async fn create_user_group(&self, request: &CreateUserGroupRequest) -> Result<UserGroup> {
        let mut state = self.state();
        state.begin("CreateUserGroup")?;
        state.create_user_group_requests.push(request.clone());
        if state.user_groups.contains_key(&request.id) {
            return Err(remote_error(
                "elasticache",
                "CreateUserGroup",
                "UserGroupAlreadyExists",
            ));
        }
        let group = UserGroup {
            id: request.id.clone(),
            status: Some("creating".to_string()),
            engine: Some(request.engine.clone()),
            user_ids: request.user_ids.clone(),
            replication_groups: Vec::new(),
            arn: None,
        };
        state.user_groups.insert(request.id.clone(), group.clone());
        Ok(group)
    }

    async fn delete_user_group(&self, id: &str) -> Result<()> {
        let mut state = self.state();
        state.begin("DeleteUserGroup")?;
        state.user_groups.remove(id).map(|_| ()).ok_or_else(|| {
            remote_error("elasticache", "DeleteUserGroup", "UserGroupNotFound")
        })
    }
}

// EC2

#[derive(Debug, Default)]
pub struct Ec2State {
    pub security_groups: HashMap<String, SecurityGroup>,
    pub calls: Vec<&'static str>,
    pub describe_requests: Vec<(Vec<Filter>, Vec<String>)>,
    pub create_requests: Vec<CreateSecurityGroupRequest>,
    next_id: usize,
    failures: Failures,
}

impl Ec2State {
    fn begin(&mut self, operation: &'static str) -> Result<()> {
        self.calls.push(operation);
        self.failures.check("ec2", operation)
    }
}

#[derive(Debug, Default)]
pub struct FakeEc2 {
    state: Mutex<Ec2State>,
}

impl FakeEc2 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, Ec2State> {
        self.state.lock().unwrap()
    }

    pub fn fail_after(&self, operation: &'static str, successes: usize, code: &str) {
        self.state().failures.rules.insert(
            operation,
            FailureRule {
                successes,
                code: code.to_string(),
            },
        );
    }
}

fn matches_filter(group: &SecurityGroup, filter: &Filter) -> bool {
    let candidates: Vec<&str> = match filter.name.as_str() {
        "group-name" => group.name.as_deref().into_iter().collect(),
        "group-id" => vec![group.id.as_str()],
        "vpc-id" => group.vpc_id.as_deref().into_iter().collect(),
        other => match other.strip_prefix("tag:") {
            Some(key) => group
                .tags
                .iter()
                .filter(|tag| tag.key == key)
                .map(|tag| tag.value.as_str())
                .collect(),
            None => Vec::new(),
        },
    };
    candidates
        .iter()
        .any(|candidate| filter.values.iter().any(|v| v == candidate))
}

#[async_trait]
impl Ec2Api for FakeEc2 {
    async fn describe_security_groups(
        &self,
        filters: &[Filter],
        group_ids: &[String],
    ) -> Result<Vec<SecurityGroup>> {
        let mut state = self.state();
        state.begin("DescribeSecurityGroups")?;
        state
            .describe_requests
            .push((filters.to_vec(), group_ids.to_vec()));
        if group_ids
            .iter()
            .any(|id| !state.security_groups.contains_key(id))
        {
            return Err(remote_error(
                "ec2",
                "DescribeSecurityGroups",
                "InvalidGroup.NotFound",
            ));
        }
        let mut groups: Vec<SecurityGroup> = state
            .security_groups
            .values()
            .filter(|group| group_ids.is_empty() || group_ids.contains(&group.id))
            .filter(|group| filters.iter().all(|filter| matches_filter(group, filter)))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(groups)
    }

    async fn create_security_group(&self, request: &CreateSecurityGroupRequest) -> Result<String> {
        let mut state = self.state();
        state.begin("CreateSecurityGroup")?;
        state.create_requests.push(request.clone());
        let duplicate = state.security_groups.values().any(|group| {
            group.name.as_deref() == Some(request.name.as_str())
                && group.vpc_id.as_deref() == Some(request.vpc_id.as_str())
        });
        if duplicate {
            return Err(remote_error(
                "ec2",
                "CreateSecurityGroup",
                "InvalidGroup.Duplicate",
            ));
        }
        state.next_id += 1;
        let id = format!("sg-{:04}", state.next_id);
        state.security_groups.insert(
            id.clone(),
            SecurityGroup {
                id: id.clone(),
                name: Some(request.name.clone()),
                description: Some(request.description.clone()),
                vpc_id: Some(request.vpc_id.clone()),
                ingress: Vec::new(),
                tags: request.tags.clone(),
            },
        );
        Ok(id)
    }

    async fn delete_security_group(&self, id: &str) -> Result<()> {
        let mut state = self.state();
        state.begin("DeleteSecurityGroup")?;
        state
            .security_groups
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| remote_error("ec2", "DeleteSecurityGroup", "InvalidGroup.NotFound"))
    }

    async fn authorize_security_group_ingress(
        &self,
        id: &str,
        permissions: &[IpPermission],
    ) -> Result<()> {
        let mut state = self.state();
        state.begin("AuthorizeSecurityGroupIngress")?;
        let group = state.security_groups.get_mut(id).ok_or_else(|| {
            remote_error(
                "ec2",
                "AuthorizeSecurityGroupIngress",
                "InvalidGroup.NotFound",
            )
        })?;
        if permissions.iter().any(|p| group.ingress.contains(p)) {
            return Err(remote_error(
                "ec2",
                "AuthorizeSecurityGroupIngress",
                "InvalidPermission.Duplicate",
            ));
        }
        group.ingress.extend(permissions.iter().cloned());
        Ok(())
    }
}

// Secrets Manager

#[derive(Debug, Default)]
pub struct SecretsState {
    pub secrets: HashMap<String, String>,
    pub calls: Vec<&'static str>,
    /// (name, force_delete_without_recovery)
    pub delete_requests: Vec<(String, bool)>,
    failures: Failures,
}

impl SecretsState {
    fn begin(&mut self, operation: &'static str) -> Result<()> {
        self.calls.push(operation);
        self.failures.check("secretsmanager", operation)
    }
}

#[derive(Debug, Default)]
pub struct FakeSecretsManager {
    state: Mutex<SecretsState>,
}

impl FakeSecretsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, SecretsState> {
        self.state.lock().unwrap()
    }

    pub fn fail_after(&self, operation: &'static str, successes: usize, code: &str) {
        self.state().failures.rules.insert(
            operation,
            FailureRule {
                successes,
                code: code.to_string(),
            },
        );
    }
}

#[async_trait]
impl SecretsManagerApi for FakeSecretsManager {
    async fn get_secret_value(&self, name: &str) -> Result<SecretValue> {
        let mut state = self.state();
        state.begin("GetSecretValue")?;
        let secret = state.secrets.get(name).ok_or_else(|| {
            remote_error(
                "secretsmanager",
                "GetSecretValue",
                "ResourceNotFoundException",
            )
        })?;
        Ok(SecretValue {
            name: Some(name.to_string()),
            arn: Some(format!(
                "arn:aws:secretsmanager:us-east-1:000000000000:secret:{name}"
            )),
            version_id: Some("v1".to_string()),
            secret_string: Some(zeroize::Zeroizing::new(secret.clone())),
        })
    }

    async fn create_secret(&self, request: &CreateSecretRequest) -> Result<()> {
        let mut state = self.state();
        state.begin("CreateSecret")?;
        if state.secrets.contains_key(&request.name) {
            return Err(remote_error(
                "secretsmanager",
                "CreateSecret",
                "ResourceExistsException",
            ));
        }
        state
            .secrets
            .insert(request.name.clone(), request.secret_string.as_str().to_string());
        Ok(())
    }

    async fn delete_secret(&self, name: &str, force_delete_without_recovery: bool) -> Result<()> {
        let mut state = self.state();
        state.begin("DeleteSecret")?;
        state
            .delete_requests
            .push((name.to_string(), force_delete_without_recovery));
        state.secrets.remove(name).map(|_| ()).ok_or_else(|| {
            remote_error(
                "secretsmanager",
                "DeleteSecret",
                "ResourceNotFoundException",
            )
        })
    }
}

/// The three fakes plus a client wired to them
pub struct TestHarness {
    pub elasticache: Arc<FakeElastiCache>,
    pub ec2: Arc<FakeEc2>,
    pub secrets: Arc<FakeSecretsManager>,
    pub client: ElastiCacheClient,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_elasticache(FakeElastiCache::new())
    }

    pub fn with_elasticache(elasticache: FakeElastiCache) -> Self {
        Self::build(elasticache, EngineDefaultsCache::new())
    }

    /// Harness whose engine defaults are never cached
    pub fn without_cache(elasticache: FakeElastiCache) -> Self {
        Self::build(elasticache, EngineDefaultsCache::disabled())
    }

    fn build(elasticache: FakeElastiCache, cache: EngineDefaultsCache) -> Self {
        let elasticache = Arc::new(elasticache);
        let ec2 = Arc::new(FakeEc2::new());
        let secrets = Arc::new(FakeSecretsManager::new());
        let client = ElastiCacheClient::from_apis(
            Arc::clone(&elasticache) as Arc<dyn ElastiCacheApi>,
            Arc::clone(&ec2) as Arc<dyn Ec2Api>,
            Arc::clone(&secrets) as Arc<dyn SecretsManagerApi>,
            Arc::new(cache),
            "ElastiCache managed by tests".to_string(),
        );
        Self {
            elasticache,
            ec2,
            secrets,
            client,
        }
    }
}
