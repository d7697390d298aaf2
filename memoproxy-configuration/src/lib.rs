//! YAML configuration for the memoproxy server.
//!
//! Two documents are involved:
//!
//! - the primary configuration ([`ServerConfig`]), read once at startup
//! - the origin mapping ([`OriginMap`]), read per request or at startup
//!   depending on [`OriginReload`]
//!
//! Store backends are selected with a `type`-tagged [`Backend`] and are only
//! available when the matching `redis` / `moka` feature is enabled.

pub mod backend;
pub mod error;
pub mod origins;
pub mod server;

pub use backend::Backend;
pub use error::ConfigError;
pub use origins::{FileOriginResolver, OriginMap};
pub use server::{OriginReload, ServerConfig};

/// Environment variable holding the primary configuration path.
pub const CONFIG_PATH_ENV: &str = "APP_CONFIG_PATH";

/// Picks the primary configuration path: `APP_CONFIG_PATH`, else `arg`.
pub fn config_path(env: Option<String>, arg: Option<String>) -> Result<std::path::PathBuf, ConfigError> {
    env.filter(|value| !value.is_empty())
        .or(arg)
        .map(Into::into)
        .ok_or(ConfigError::MissingPath(CONFIG_PATH_ENV))
}
