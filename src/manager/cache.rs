//! # Engine Defaults Cache
//!
//! Engine default parameters never change for a given family, so they are fetched
//! once per family and kept for the lifetime of the cache.
//!
//! Each family owns a `tokio::sync::OnceCell`: concurrent first lookups of the same
//! family wait on a single fetch instead of issuing their own. A failed fetch leaves
//! the cell empty so the next lookup tries again. Entries are never evicted.

use crate::error::Result;
use crate::observability::metrics;
use crate::types::Parameter;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::debug;

type Entry = Arc<OnceCell<Arc<[Parameter]>>>;

#[derive(Debug)]
pub struct EngineDefaultsCache {
    /// `None` when caching is disabled
    entries: Option<Mutex<HashMap<String, Entry>>>,
}

impl Default for EngineDefaultsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineDefaultsCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Some(Mutex::new(HashMap::new())),
        }
    }

    /// A cache that never stores anything; every lookup fetches
    #[must_use]
    pub fn disabled() -> Self {
        Self { entries: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// Return the cached parameters for `family`, running `fetch` on a miss.
    ///
    /// # Errors
    ///
    /// Returns the error from `fetch`; nothing is cached in that case.
    pub async fn get_or_fetch<F, Fut>(&self, family: &str, fetch: F) -> Result<Arc<[Parameter]>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Parameter>>>,
    {
        let Some(entries) = &self.entries else {
            return fetch().await.map(Arc::from);
        };

        let cell = {
            let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(family.to_string()).or_default())
        };

        if let Some(parameters) = cell.get() {
            debug!(family, "Engine defaults cache hit");
            metrics::increment_engine_defaults_cache_hits();
            return Ok(Arc::clone(parameters));
        }

        let mut fetched = false;
        let parameters = cell
            .get_or_try_init(|| async {
                fetched = true;
                debug!(family, "Engine defaults cache miss");
                metrics::increment_engine_defaults_cache_misses();
                fetch().await.map(Arc::from)
            })
            .await?;
        if !fetched {
            // Another caller completed the fetch while this one waited
            metrics::increment_engine_defaults_cache_hits();
        }
        Ok(Arc::clone(parameters))
    }

    /// Cached parameters for `family`, without fetching
    #[must_use]
    pub fn get(&self, family: &str) -> Option<Arc<[Parameter]>> {
        let entries = self
            .entries
            .as_ref()?
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.get(family)?.get().map(Arc::clone)
    }

    /// Number of families with cached parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| {
            entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .values()
                .filter(|cell| cell.initialized())
                .count()
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
