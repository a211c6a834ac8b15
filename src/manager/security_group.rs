use super::empty_if_not_found;
use crate::constants::security_group_description;
use crate::error::Result;
use crate::provider::{CreateSecurityGroupRequest, Ec2Api};
use crate::types::{Filter, IpPermission, SecurityGroup, Tag};
use std::sync::Arc;

/// EC2 security groups guarding the cluster's network access
#[derive(Clone)]
pub struct SecurityGroupManager {
    api: Arc<dyn Ec2Api>,
}

impl std::fmt::Debug for SecurityGroupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityGroupManager").finish_non_exhaustive()
    }
}

impl SecurityGroupManager {
    pub fn new(api: Arc<dyn Ec2Api>) -> Self {
        Self { api }
    }

    /// Security groups matching `filters` and/or `ids`.
    ///
    /// Looking up an id that does not exist yields an empty list.
    pub async fn describe(&self, filters: &[Filter], ids: &[String]) -> Result<Vec<SecurityGroup>> {
        empty_if_not_found(self.api.describe_security_groups(filters, ids).await)
    }

    /// Create a security group in `vpc_id` and return its id
    pub async fn create(&self, vpc_id: &str, name: &str, tags: &[Tag]) -> Result<String> {
        let request = CreateSecurityGroupRequest {
            vpc_id: vpc_id.to_string(),
            name: name.to_string(),
            description: security_group_description(name),
            tags: tags.to_vec(),
        };
        self.api.create_security_group(&request).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete_security_group(id).await
    }

    /// Append ingress rules. A rule that already exists is a provider error.
    pub async fn authorize_ingress(&self, id: &str, permissions: &[IpPermission]) -> Result<()> {
        self.api
            .authorize_security_group_ingress(id, permissions)
            .await
    }
}
