//! # Constants
//!
//! Remote API limits and fixed values shared by the managers.
//!
//! The limits mirror what the ElastiCache API accepts; they are not tunable
//! because exceeding them makes the provider reject the request.

/// Records requested per page when listing the parameters of a parameter group
pub const DESCRIBE_PARAMETERS_PAGE_SIZE: i32 = 20;

/// Maximum parameter name/value pairs accepted by a single `ModifyCacheParameterGroup` call
pub const MODIFY_PARAMETERS_MAX_CHUNK_SIZE: usize = 20;

/// Engine used for replication groups and user groups
pub const ENGINE_REDIS: &str = "redis";

/// The single member every user group is created with
pub const DEFAULT_USER_ID: &str = "default";

/// Number of cache clusters in a created replication group (single node)
pub const SINGLE_NODE_CACHE_CLUSTERS: i32 = 1;

/// Number of node groups (shards) in a created replication group
pub const SINGLE_SHARD_NODE_GROUPS: i32 = 1;

/// Default description attached to created replication groups
pub const DEFAULT_REPLICATION_GROUP_DESCRIPTION: &str =
    "ElastiCache managed by elasticache-provisioner";

/// Default AWS region when none is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Service label for ElastiCache requests (metrics and spans)
pub const SERVICE_ELASTICACHE: &str = "elasticache";

/// Service label for EC2 requests (metrics and spans)
pub const SERVICE_EC2: &str = "ec2";

/// Service label for Secrets Manager requests (metrics and spans)
pub const SERVICE_SECRETS_MANAGER: &str = "secretsmanager";

/// Description for a created cache subnet group
#[must_use]
pub fn subnet_group_description(name: &str) -> String {
    format!("SubnetGroup for ElastiCache {name}")
}

/// Description for a created cache parameter group
#[must_use]
pub fn parameter_group_description(name: &str) -> String {
    format!("ParameterGroup for ElastiCache {name}")
}

/// Description for a created EC2 security group
#[must_use]
pub fn security_group_description(name: &str) -> String {
    format!("SecurityGroup for ElastiCache {name}")
}
