use super::none_if_not_found;
use crate::constants::{DEFAULT_USER_ID, ENGINE_REDIS};
use crate::error::Result;
use crate::provider::{CreateUserGroupRequest, ElastiCacheApi};
use crate::types::{Tag, UserGroup};
use std::sync::Arc;

/// RBAC user groups attachable to a replication group
#[derive(Clone)]
pub struct UserGroupManager {
    api: Arc<dyn ElastiCacheApi>,
}

impl std::fmt::Debug for UserGroupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserGroupManager").finish_non_exhaustive()
    }
}

impl UserGroupManager {
    pub fn new(api: Arc<dyn ElastiCacheApi>) -> Self {
        Self { api }
    }

    /// The user group with this id; `None` when not found or nothing is listed
    pub async fn describe(&self, id: &str) -> Result<Option<UserGroup>> {
        let groups = none_if_not_found(self.api.describe_user_groups(id).await)?;
        Ok(groups.and_then(|groups| groups.into_iter().next()))
    }

    /// Create a redis user group whose only member is the `default` user
    pub async fn create(&self, id: &str, tags: &[Tag]) -> Result<UserGroup> {
        let request = CreateUserGroupRequest {
            id: id.to_string(),
            engine: ENGINE_REDIS.to_string(),
            user_ids: vec![DEFAULT_USER_ID.to_string()],
            tags: tags.to_vec(),
        };
        self.api.create_user_group(&request).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete_user_group(id).await
    }
}
