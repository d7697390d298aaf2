use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use memoproxy::{CacheError, OriginResolver, StaticOriginResolver};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Origin mapping file: a flat YAML mapping of origin key to base URL.
///
/// ```yaml
/// svc1: https://api.example.com
/// billing: http://10.0.0.12:8080/v2
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OriginMap(HashMap<String, String>);

impl OriginMap {
    /// Parses a mapping document. `origin` names the document in errors.
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(yaml).map_err(|e| ConfigError::parse(origin, e))
    }

    /// Reads and parses the mapping file at `path`.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_owned(),
                source,
            })?;
        Self::from_yaml(&yaml, &path.display().to_string())
    }

    /// Base URL for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of origin keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Freezes the mapping into a resolver.
    pub fn into_resolver(self) -> StaticOriginResolver {
        StaticOriginResolver::new(self.0)
    }
}

/// Resolver that re-reads the mapping file on every request.
///
/// Edits to the file take effect on the next request without a restart. A
/// missing or malformed file fails only the requests made while it is broken.
#[derive(Debug, Clone)]
pub struct FileOriginResolver {
    path: PathBuf,
}

impl FileOriginResolver {
    /// Resolver over the mapping file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The mapping file this resolver reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OriginResolver for FileOriginResolver {
    async fn resolve(&self, key: &str) -> Result<String, CacheError> {
        let origins = OriginMap::load(&self.path)
            .await
            .map_err(|e| CacheError::ConfigUnavailable(e.to_string()))?;
        debug!(path = %self.path.display(), origins = origins.len(), "origin map loaded");
        origins
            .get(key)
            .map(str::to_owned)
            .ok_or_else(|| CacheError::ConfigUnavailable(format!("unknown origin key `{key}`")))
    }
}
