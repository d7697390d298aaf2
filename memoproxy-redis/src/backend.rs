//! Redis backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use memoproxy_backend::{Backend, BackendError, BackendResult};
use memoproxy_core::{BackendLabel, CacheKey};
use redis::{Client, aio::ConnectionManager};
use tokio::sync::OnceCell;
use tracing::trace;

use crate::error::Error;

/// Redis store backend based on the redis-rs crate.
///
/// Values are plain Redis strings written with `SET ... PX <ttl>`, so the
/// store layout stays readable from `redis-cli`:
///
/// ```text
/// GET bb6cb5c68df4652941caf652a366f2d8         -> base64 body
/// GET bb6cb5c68df4652941caf652a366f2d8-header  -> base64 JSON headers
/// GET counter                                  -> "3"
/// ```
///
/// A [`ConnectionManager`] is created lazily on first use and reconnects on
/// its own after a dropped connection.
///
/// [`ConnectionManager`]: redis::aio::ConnectionManager
#[derive(Clone)]
pub struct RedisBackend {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    label: BackendLabel,
}

impl RedisBackend {
    /// Creates new RedisBackend builder with default settings.
    #[must_use]
    pub fn builder() -> RedisBackendBuilder {
        RedisBackendBuilder::default()
    }

    /// Create lazy connection to redis via [`ConnectionManager`]
    pub async fn connection(&self) -> Result<&ConnectionManager, BackendError> {
        trace!("Get connection manager");
        let manager = self
            .connection
            .get_or_try_init(|| {
                trace!("Initialize new redis connection manager");
                self.client.get_connection_manager()
            })
            .await
            .map_err(Error::from)?;
        Ok(manager)
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("label", &self.label)
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

/// Part of builder pattern implementation for RedisBackend.
pub struct RedisBackendBuilder {
    connection_info: String,
    label: BackendLabel,
}

impl Default for RedisBackendBuilder {
    fn default() -> Self {
        Self {
            connection_info: "redis://127.0.0.1/".to_owned(),
            label: BackendLabel::new_static("redis"),
        }
    }
}

impl RedisBackendBuilder {
    /// Set connection info (host, port, database, etc.) for RedisBackend.
    pub fn server(mut self, connection_info: impl Into<String>) -> Self {
        self.connection_info = connection_info.into();
        self
    }

    /// Set a custom label for this backend.
    pub fn label(mut self, label: impl Into<BackendLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Create new instance of Redis backend with passed settings.
    ///
    /// Only the URL is validated here; no connection is opened until the
    /// first store operation.
    pub fn build(self) -> Result<RedisBackend, Error> {
        Ok(RedisBackend {
            client: Client::open(self.connection_info)?,
            connection: OnceCell::new(),
            label: self.label,
        })
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>> {
        let mut con = self.connection().await?.clone();

        let value: Option<String> = redis::cmd("GET")
            .arg(key.as_str())
            .query_async(&mut con)
            .await
            .map_err(Error::from)?;

        Ok(value)
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: String,
        ttl: Option<Duration>,
    ) -> BackendResult<()> {
        let mut con = self.connection().await?.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(key.as_str()).arg(value);
        if let Some(ttl) = ttl {
            // PX 0 is rejected by Redis; round sub-millisecond TTLs up.
            let millis = ttl.as_millis().clamp(1, u64::MAX as u128) as u64;
            cmd.arg("PX").arg(millis);
        }

        cmd.query_async::<()>(&mut con)
            .await
            .map_err(Error::from)?;
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        self.label.clone()
    }
}
