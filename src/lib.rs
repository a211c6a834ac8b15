//! ElastiCache Provisioner Library
//!
//! Managers for the resources an ElastiCache replication group depends on: subnet
//! groups, parameter groups (with cached engine defaults), EC2 security groups,
//! the Secrets Manager auth token, RBAC user groups and the replication group
//! itself.
//!
//! Each manager wraps one remote API trait from [`provider`]; [`provider::aws`]
//! implements those traits on the AWS SDK. [`ElastiCacheClient`] bundles all
//! managers for callers that orchestrate a full cluster lifecycle.

pub mod config;
pub mod constants;
pub mod error;
pub mod manager;
pub mod observability;
pub mod provider;
pub mod types;

pub use config::ProvisionerConfig;
pub use error::{Error, Result};
pub use manager::{
    AuthTokenManager, ElastiCacheClient, EngineDefaultsCache, ParameterGroupManager,
    ReplicationGroupManager, SecurityGroupManager, SubnetGroupManager, UserGroupManager,
};
