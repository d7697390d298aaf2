use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::CacheError;

/// Maps an origin key (the `{key}` route segment) to an origin base URL.
///
/// Implementations report an unknown key, or a mapping source that cannot be
/// read, as [`CacheError::ConfigUnavailable`].
#[async_trait]
pub trait OriginResolver: Send + Sync {
    /// Returns the base URL for `key`, without a trailing slash requirement.
    async fn resolve(&self, key: &str) -> Result<String, CacheError>;
}

#[async_trait]
impl<T> OriginResolver for Arc<T>
where
    T: OriginResolver + ?Sized,
{
    async fn resolve(&self, key: &str) -> Result<String, CacheError> {
        (**self).resolve(key).await
    }
}

#[async_trait]
impl OriginResolver for Box<dyn OriginResolver> {
    async fn resolve(&self, key: &str) -> Result<String, CacheError> {
        (**self).resolve(key).await
    }
}

/// Resolver over a mapping fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticOriginResolver {
    origins: HashMap<String, String>,
}

impl StaticOriginResolver {
    /// Creates a resolver from `(key, base_url)` pairs.
    pub fn new<K, V>(origins: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        origins.into_iter().collect()
    }

    /// Number of known origin keys.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Whether no origin key is known.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticOriginResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            origins: iter
                .into_iter()
                .map(|(key, url)| (key.into(), url.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl OriginResolver for StaticOriginResolver {
    async fn resolve(&self, key: &str) -> Result<String, CacheError> {
        self.origins
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::ConfigUnavailable(format!("unknown origin key `{key}`")))
    }
}
