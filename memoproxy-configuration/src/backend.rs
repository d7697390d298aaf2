use std::sync::Arc;

use memoproxy_backend::Backend as BackendTrait;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Moka {
    pub max_capacity: u64,
    /// Optional label for this backend (used in metrics/tracing).
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Redis {
    pub connection_string: String,
    /// Optional label for this backend (used in metrics/tracing).
    #[serde(default)]
    pub label: Option<String>,
}

/// Store selection, tagged by `type`.
///
/// ```yaml
/// type: Redis
/// connection_string: redis://127.0.0.1:6379
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Backend {
    Redis(Redis),
    Moka(Moka),
}

impl Backend {
    /// Store backed by Redis at `url`.
    pub fn redis(url: impl Into<String>) -> Self {
        Backend::Redis(Redis {
            connection_string: url.into(),
            label: None,
        })
    }

    pub fn into_backend(self) -> Result<Arc<dyn BackendTrait + Send + 'static>, ConfigError> {
        match self {
            #[cfg(feature = "redis")]
            Backend::Redis(config) => {
                use memoproxy_redis::RedisBackend;

                let mut builder = RedisBackend::builder().server(config.connection_string);
                if let Some(label) = config.label {
                    builder = builder.label(label);
                }

                let backend = builder
                    .build()
                    .map_err(|e| ConfigError::BackendNotAvailable(format!("Redis: {}", e)))?;

                Ok(Arc::new(backend))
            }
            #[cfg(not(feature = "redis"))]
            Backend::Redis(_) => Err(ConfigError::BackendNotAvailable("Redis".to_string())),
            #[cfg(feature = "moka")]
            Backend::Moka(config) => {
                use memoproxy_moka::MokaBackend;

                let mut builder = MokaBackend::builder(config.max_capacity);
                if let Some(label) = config.label {
                    builder = builder.label(label);
                }

                Ok(Arc::new(builder.build()))
            }
            #[cfg(not(feature = "moka"))]
            Backend::Moka(_) => Err(ConfigError::BackendNotAvailable("Moka".to_string())),
        }
    }
}
