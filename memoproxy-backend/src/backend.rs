use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use memoproxy_core::{BackendLabel, CacheKey};

use crate::BackendError;

pub type BackendResult<T> = Result<T, BackendError>;

/// A string-oriented key-value store with per-key expiration.
///
/// This is deliberately thin: no cache logic lives here. The engine decides
/// what to store and how to encode it; a backend only moves strings.
#[async_trait]
pub trait Backend: Sync + Send {
    /// Reads `key`. A missing or expired key is `Ok(None)`.
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// With `Some(ttl)` the key expires `ttl` after the write; with `None` it
    /// never expires.
    async fn set(&self, key: &CacheKey, value: String, ttl: Option<Duration>)
    -> BackendResult<()>;

    /// Returns the label of this backend for logs and metrics.
    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("backend")
    }
}

#[async_trait]
impl Backend for &dyn Backend {
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>> {
        (*self).get(key).await
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: String,
        ttl: Option<Duration>,
    ) -> BackendResult<()> {
        (*self).set(key, value, ttl).await
    }

    fn label(&self) -> BackendLabel {
        (*self).label()
    }
}

#[async_trait]
impl Backend for Box<dyn Backend> {
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: String,
        ttl: Option<Duration>,
    ) -> BackendResult<()> {
        (**self).set(key, value, ttl).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}

#[async_trait]
impl Backend for Arc<dyn Backend + Send + 'static> {
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: String,
        ttl: Option<Duration>,
    ) -> BackendResult<()> {
        (**self).set(key, value, ttl).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}
