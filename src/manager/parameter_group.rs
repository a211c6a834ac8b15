//! # Parameter Group Manager
//!
//! Parameter groups are created empty for an engine family and then changed with
//! batched overrides. Listing the parameters of a group and the engine defaults
//! of a family both use the marker protocol in [`super::pagination`].

use super::cache::EngineDefaultsCache;
use super::empty_if_not_found;
use super::pagination::collect_pages;
use crate::constants::{
    parameter_group_description, DESCRIBE_PARAMETERS_PAGE_SIZE, MODIFY_PARAMETERS_MAX_CHUNK_SIZE,
};
use crate::error::Result;
use crate::provider::{CreateParameterGroupRequest, ElastiCacheApi, ModifyParameterGroupRequest};
use crate::types::{Parameter, ParameterGroup, ParameterNameValue, Tag};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ParameterGroupManager {
    api: Arc<dyn ElastiCacheApi>,
    engine_defaults: Arc<EngineDefaultsCache>,
}

impl std::fmt::Debug for ParameterGroupManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterGroupManager")
            .field("engine_defaults", &self.engine_defaults)
            .finish_non_exhaustive()
    }
}

impl ParameterGroupManager {
    pub fn new(api: Arc<dyn ElastiCacheApi>, engine_defaults: Arc<EngineDefaultsCache>) -> Self {
        Self {
            api,
            engine_defaults,
        }
    }

    #[must_use]
    pub fn engine_defaults(&self) -> &EngineDefaultsCache {
        &self.engine_defaults
    }

    /// Parameter groups with this name; empty when none exists
    pub async fn describe(&self, name: &str) -> Result<Vec<ParameterGroup>> {
        empty_if_not_found(self.api.describe_cache_parameter_groups(name).await)
    }

    /// Create an empty parameter group for `family`.
    ///
    /// Fails with the provider's error when the name is already taken.
    pub async fn create(&self, name: &str, family: &str, tags: &[Tag]) -> Result<ParameterGroup> {
        let request = CreateParameterGroupRequest {
            name: name.to_string(),
            family: family.to_string(),
            description: parameter_group_description(name),
            tags: tags.to_vec(),
        };
        self.api.create_cache_parameter_group(&request).await
    }

    /// Delete a parameter group; the provider refuses while clusters still use it
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.api.delete_cache_parameter_group(name).await
    }

    /// Every parameter of a group, in the order the provider returns them
    pub async fn list_parameters(&self, group_name: &str) -> Result<Vec<Parameter>> {
        let api = &self.api;
        collect_pages("DescribeCacheParameters", move |marker| async move {
            api.describe_cache_parameters(group_name, marker.as_deref(), DESCRIBE_PARAMETERS_PAGE_SIZE)
                .await
        })
        .await
    }

    /// Apply parameter overrides to a group.
    ///
    /// Parameters are submitted in input order in batches of at most
    /// [`MODIFY_PARAMETERS_MAX_CHUNK_SIZE`], one request per batch, each awaited
    /// before the next. The first failing batch aborts the call and earlier batches
    /// stay applied; re-running the whole call converges because later batches
    /// overwrite the same names. A parameter without a value fails the call with
    /// [`Error::MissingParameterValue`](crate::Error::MissingParameterValue) before
    /// any batch is sent.
    pub async fn apply_parameters(&self, group_name: &str, parameters: &[Parameter]) -> Result<()> {
        let parameters = parameters
            .iter()
            .map(ParameterNameValue::try_from)
            .collect::<Result<Vec<_>>>()?;
        let total = parameters.len().div_ceil(MODIFY_PARAMETERS_MAX_CHUNK_SIZE);

        for (index, chunk) in parameters
            .chunks(MODIFY_PARAMETERS_MAX_CHUNK_SIZE)
            .enumerate()
        {
            debug!(
                parameter_group = group_name,
                chunk = index + 1,
                total,
                size = chunk.len(),
                "Submitting parameter overrides"
            );
            let request = ModifyParameterGroupRequest {
                name: group_name.to_string(),
                parameters: chunk.to_vec(),
            };
            self.api.modify_cache_parameter_group(&request).await?;
        }

        Ok(())
    }

    /// Engine default parameters for `family`.
    ///
    /// Served from the engine defaults cache when present, otherwise fetched across
    /// all pages and cached for the lifetime of the cache.
    pub async fn describe_engine_defaults(&self, family: &str) -> Result<Arc<[Parameter]>> {
        let api = &self.api;
        self.engine_defaults
            .get_or_fetch(family, move || {
                collect_pages("DescribeEngineDefaultParameters", move |marker| async move {
                    api.describe_engine_default_parameters(family, marker.as_deref())
                        .await
                })
            })
            .await
    }
}
