//! # Auth Token Manager
//!
//! The auth token of a replication group lives in a Secrets Manager secret. The
//! token is generated here and never chosen by the caller.

use super::none_if_not_found;
use crate::error::Result;
use crate::provider::{CreateSecretRequest, SecretsManagerApi};
use crate::types::{SecretValue, Tag};
use std::sync::Arc;
use zeroize::Zeroizing;

#[derive(Clone)]
pub struct AuthTokenManager {
    api: Arc<dyn SecretsManagerApi>,
}

impl std::fmt::Debug for AuthTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokenManager").finish_non_exhaustive()
    }
}

impl AuthTokenManager {
    pub fn new(api: Arc<dyn SecretsManagerApi>) -> Self {
        Self { api }
    }

    /// The stored secret, or `None` when no secret with this name exists
    pub async fn get(&self, name: &str) -> Result<Option<SecretValue>> {
        none_if_not_found(self.api.get_secret_value(name).await)
    }

    /// Create the secret holding a freshly generated token
    pub async fn create(&self, name: &str, tags: &[Tag]) -> Result<()> {
        let request = CreateSecretRequest {
            name: name.to_string(),
            secret_string: generate_token(),
            tags: tags.to_vec(),
        };
        self.api.create_secret(&request).await
    }

    /// Delete the secret immediately, without a recovery window
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.api.delete_secret(name, true).await
    }
}

fn generate_token() -> Zeroizing<String> {
    Zeroizing::new(uuid::Uuid::new_v4().to_string())
}
