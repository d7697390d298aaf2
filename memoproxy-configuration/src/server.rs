use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use memoproxy::{ErrorPolicy, OriginResolver, PolicyConfig};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::error::ConfigError;
use crate::origins::{FileOriginResolver, OriginMap};

/// When the origin mapping file is read.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OriginReload {
    /// Re-read the file on every request.
    #[default]
    PerRequest,
    /// Read the file once at startup; a broken file is fatal.
    Startup,
}

/// Primary server configuration.
///
/// ```yaml
/// port: "8080"
/// proxy-path: ./proxies.yaml
/// redis-url: redis://127.0.0.1:6379
/// origin-reload: per-request
/// origin-timeout: 30s
/// error-policy: degrade
/// cache:
///   body-ttl: 24h
///   header-ttl: 24h
///   counter-ttl: 5h
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    /// TCP port to listen on, as an integer or an integer string.
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Path of the origin mapping file.
    pub proxy_path: PathBuf,
    /// Redis URL, used when `store` is not set.
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Store selection; takes precedence over `redis-url`.
    #[serde(default)]
    pub store: Option<Backend>,
    /// When the origin mapping file is read.
    #[serde(default)]
    pub origin_reload: OriginReload,
    /// Per-request origin timeout; none by default.
    #[serde(default, with = "humantime_serde")]
    pub origin_timeout: Option<Duration>,
    /// How degradations map to status codes.
    #[serde(default)]
    pub error_policy: ErrorPolicy,
    /// Store write TTLs.
    #[serde(default)]
    pub cache: PolicyConfig,
}

impl ServerConfig {
    /// Parses a configuration document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(yaml).map_err(|e| ConfigError::parse("<inline>", e))
    }

    /// Reads and parses the configuration file at `path`.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_owned(),
                source,
            })?;
        serde_saphyr::from_str(&yaml).map_err(|e| ConfigError::parse(path.display().to_string(), e))
    }

    /// The store to use: `store` if set, otherwise Redis at `redis-url`.
    pub fn backend(&self) -> Result<Backend, ConfigError> {
        match (&self.store, &self.redis_url) {
            (Some(store), _) => Ok(store.clone()),
            (None, Some(url)) => Ok(Backend::redis(url.clone())),
            (None, None) => Err(ConfigError::MissingStore),
        }
    }

    /// Builds the origin resolver selected by `origin-reload`.
    ///
    /// With [`OriginReload::Startup`] the mapping file is read here, and a
    /// missing or malformed file is an error.
    pub async fn origin_resolver(&self) -> Result<Arc<dyn OriginResolver>, ConfigError> {
        match self.origin_reload {
            OriginReload::PerRequest => Ok(Arc::new(FileOriginResolver::new(self.proxy_path.clone()))),
            OriginReload::Startup => {
                let origins = OriginMap::load(&self.proxy_path).await?;
                Ok(Arc::new(origins.into_resolver()))
            }
        }
    }
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    struct PortVisitor;

    impl Visitor<'_> for PortVisitor {
        type Value = u16;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a port number or a string holding one")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u16, E> {
            u16::try_from(value).map_err(|_| E::custom(ConfigError::InvalidPort(value.to_string())))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u16, E> {
            u16::try_from(value).map_err(|_| E::custom(ConfigError::InvalidPort(value.to_string())))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u16, E> {
            value
                .trim()
                .parse()
                .map_err(|_| E::custom(ConfigError::InvalidPort(value.to_owned())))
        }
    }

    deserializer.deserialize_any(PortVisitor)
}
