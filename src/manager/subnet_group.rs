use super::empty_if_not_found;
use crate::constants::subnet_group_description;
use crate::error::Result;
use crate::provider::{CreateSubnetGroupRequest, ElastiCacheApi};
use crate::types::{SubnetGroup, Tag};
use std::sync::Arc;

/// Cache subnet groups: named sets of subnets the cluster's nodes are placed in
#[derive(Clone)]
pub struct SubnetGroupManager {
    api: Arc<dyn ElastiCacheApi>,
}

impl std::fmt::Debug for SubnetGroupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubnetGroupManager").finish_non_exhaustive()
    }
}

impl SubnetGroupManager {
    pub fn new(api: Arc<dyn ElastiCacheApi>) -> Self {
        Self { api }
    }

    /// Subnet groups with this name; empty when none exists
    pub async fn describe(&self, name: &str) -> Result<Vec<SubnetGroup>> {
        empty_if_not_found(self.api.describe_cache_subnet_groups(name).await)
    }

    /// Create a subnet group; the description is derived from the name
    pub async fn create(
        &self,
        name: &str,
        subnet_ids: &[String],
        tags: &[Tag],
    ) -> Result<SubnetGroup> {
        let request = CreateSubnetGroupRequest {
            name: name.to_string(),
            description: subnet_group_description(name),
            subnet_ids: subnet_ids.to_vec(),
            tags: tags.to_vec(),
        };
        self.api.create_cache_subnet_group(&request).await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.api.delete_cache_subnet_group(name).await
    }
}
