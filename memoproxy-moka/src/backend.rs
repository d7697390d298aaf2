//! Moka backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use memoproxy_backend::{Backend, BackendResult};
use memoproxy_core::{BackendLabel, CacheKey};
use moka::future::Cache;
use tracing::trace;

/// A value together with the TTL it was written with.
#[derive(Clone, Debug)]
pub(crate) struct StoredValue {
    pub(crate) data: String,
    pub(crate) ttl: Option<Duration>,
}

/// In-memory store backend powered by Moka.
///
/// Holds at most `max_capacity` entries and evicts the least recently used
/// ones beyond that. Each entry expires according to the TTL passed to
/// [`Backend::set`].
///
/// # Caveats
///
/// - Data is **not persisted**: the cache is lost on process restart
/// - Data is **not shared** across processes: use Redis for that
#[derive(Clone)]
pub struct MokaBackend {
    pub(crate) cache: Cache<CacheKey, StoredValue>,
    pub(crate) label: BackendLabel,
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("label", &self.label)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MokaBackend {
    /// Creates a new builder for `MokaBackend` with the specified maximum capacity.
    pub fn builder(max_capacity: u64) -> crate::builder::MokaBackendBuilder {
        crate::builder::MokaBackendBuilder::new(max_capacity)
    }
}

#[async_trait]
impl Backend for MokaBackend {
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>> {
        let value = self.cache.get(key).await.map(|stored| stored.data);
        trace!(key = %key, found = value.is_some(), "moka get");
        Ok(value)
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: String,
        ttl: Option<Duration>,
    ) -> BackendResult<()> {
        trace!(key = %key, ?ttl, "moka set");
        self.cache
            .insert(key.clone(), StoredValue { data: value, ttl })
            .await;
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        self.label.clone()
    }
}
