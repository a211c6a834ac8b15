//! # AWS Secrets Manager
//!
//! [`SecretsManagerApi`] on top of `aws-sdk-secretsmanager`.
//!
//! Secret values never appear in spans or log events.

use super::{non_empty, observe, owned, remote_error};
use crate::constants::SERVICE_SECRETS_MANAGER;
use crate::error::Result;
use crate::provider::{CreateSecretRequest, SecretsManagerApi};
use crate::types::SecretValue;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use tracing::{debug_span, Instrument};
use zeroize::Zeroizing;

/// Secrets Manager API client
pub struct AwsSecretsManager {
    client: SecretsManagerClient,
}

impl std::fmt::Debug for AwsSecretsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManager").finish_non_exhaustive()
    }
}

impl AwsSecretsManager {
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(SecretsManagerClient::new(sdk_config))
    }

    #[must_use]
    pub fn from_client(client: SecretsManagerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretsManagerApi for AwsSecretsManager {
    async fn get_secret_value(&self, name: &str) -> Result<SecretValue> {
        const OPERATION: &str = "GetSecretValue";
        let span = debug_span!("secretsmanager.get_secret_value", secret.name = name);
        observe(SERVICE_SECRETS_MANAGER, OPERATION, async {
            let out = self
                .client
                .get_secret_value()
                .secret_id(name)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_SECRETS_MANAGER, OPERATION, &e))?;
            Ok(SecretValue {
                name: owned(out.name()),
                arn: owned(out.arn()),
                version_id: owned(out.version_id()),
                secret_string: out
                    .secret_string()
                    .map(|value| Zeroizing::new(value.to_string())),
            })
        })
        .instrument(span)
        .await
    }

    async fn create_secret(&self, request: &CreateSecretRequest) -> Result<()> {
        const OPERATION: &str = "CreateSecret";
        let span = debug_span!("secretsmanager.create_secret", secret.name = %request.name);
        let tags = request
            .tags
            .iter()
            .map(|tag| {
                aws_sdk_secretsmanager::types::Tag::builder()
                    .key(&tag.key)
                    .value(&tag.value)
                    .build()
            })
            .collect::<Vec<_>>();
        observe(SERVICE_SECRETS_MANAGER, OPERATION, async {
            self.client
                .create_secret()
                .name(&request.name)
                .secret_string(request.secret_string.as_str())
                .set_tags(non_empty(&tags))
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_SECRETS_MANAGER, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }

    async fn delete_secret(&self, name: &str, force_delete_without_recovery: bool) -> Result<()> {
        const OPERATION: &str = "DeleteSecret";
        let span = debug_span!(
            "secretsmanager.delete_secret",
            secret.name = name,
            force_delete_without_recovery
        );
        observe(SERVICE_SECRETS_MANAGER, OPERATION, async {
            self.client
                .delete_secret()
                .secret_id(name)
                .force_delete_without_recovery(force_delete_without_recovery)
                .send()
                .await
                .map_err(|e| remote_error(SERVICE_SECRETS_MANAGER, OPERATION, &e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }
}
