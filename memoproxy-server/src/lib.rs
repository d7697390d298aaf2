//! HTTP front door for memoproxy.
//!
//! | Route | Methods | Behaviour |
//! |-------|---------|-----------|
//! | `/v1/ping` | GET | bumps the liveness counter, answers `pong` |
//! | `/v1/p/{key}/{*path}` | GET, POST, PUT, DELETE, HEAD, OPTIONS | proxy-cache |
//! | anything else | any | `404` JSON envelope |
//! | known route, other method | | `405` JSON envelope |
//!
//! Proxied responses carry an `x-cache-status: HIT|MISS` header.

pub mod body;
pub mod envelope;
pub mod error;
pub mod router;
pub mod state;
pub mod telemetry;

use axum::Router;
use memoproxy_backend::Backend as _;
use memoproxy_configuration::ServerConfig;
use memoproxy_reqwest::ReqwestUpstream;
use tracing::info;

pub use error::ServerError;
pub use router::{CACHE_STATUS_HEADER, ProxyTarget, router};
pub use state::{AppState, SharedBackend};

/// Builds every component `config` describes and returns the router.
///
/// Fails on an unusable store definition, and on an unreadable origin
/// mapping when it is loaded at startup.
pub async fn build(config: &ServerConfig) -> Result<Router, ServerError> {
    let backend = config.backend()?.into_backend()?;
    let resolver = config.origin_resolver().await?;

    let mut upstream = ReqwestUpstream::default();
    if let Some(timeout) = config.origin_timeout {
        upstream = upstream.with_timeout(timeout);
    }

    info!(
        store = %backend.label(),
        origins = %config.proxy_path.display(),
        reload = ?config.origin_reload,
        error_policy = ?config.error_policy,
        "memoproxy configured"
    );

    let state = AppState::new(
        backend,
        upstream,
        resolver,
        config.cache.clone(),
        config.error_policy,
    );
    Ok(router(state))
}
