use std::path::PathBuf;

/// Error produced while loading configuration.
///
/// Every variant is fatal at startup. At request time, the per-request
/// origin resolver turns these into a degradation instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration path was supplied.
    #[error("configuration path not set: pass it as the first argument or set {0}")]
    MissingPath(&'static str),
    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A configuration document is not valid YAML for its schema.
    #[error("failed to parse {origin}: {message}")]
    Parse {
        /// File (or `<inline>`) being parsed.
        origin: String,
        /// Parser message, with position when available.
        message: String,
    },
    /// The `port` value is not a TCP port number.
    #[error("invalid port `{0}`")]
    InvalidPort(String),
    /// Neither `store` nor `redis-url` is set.
    #[error("no store configured: set `store` or `redis-url`")]
    MissingStore,
    /// The selected store is not compiled in or could not be created.
    #[error("store backend not available: {0}")]
    BackendNotAvailable(String),
}

impl ConfigError {
    pub(crate) fn parse(origin: impl Into<String>, error: impl std::fmt::Display) -> Self {
        ConfigError::Parse {
            origin: origin.into(),
            message: error.to_string(),
        }
    }
}
