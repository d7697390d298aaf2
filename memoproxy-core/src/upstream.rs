//! Origin dispatch contract.

use std::future::Future;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

/// A fully buffered request ready to be sent to the origin.
#[derive(Debug, Clone)]
pub struct OriginRequest {
    /// Method copied from the inbound request.
    pub method: Method,
    /// Absolute origin URL (`<base>/<path>`), not escaped or normalized.
    pub url: String,
    /// Inbound headers, minus connection-scoped ones.
    pub headers: HeaderMap,
    /// Buffered inbound body.
    pub body: Bytes,
}

/// A fully buffered origin response.
///
/// The [`Default`] value is the zero-value response the engine falls back to
/// when the origin cannot be reached: `200 OK`, no headers, empty body.
#[derive(Debug, Clone, Default)]
pub struct OriginResponse {
    /// Status returned by the origin.
    pub status: StatusCode,
    /// All origin headers, multi-valued ones included.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
}

/// Error produced while talking to the origin.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The outbound request could not be built (bad URL, bad method, ...).
    #[error("invalid origin request: {0}")]
    InvalidRequest(String),
    /// Transport-level failure: connect, TLS, timeout, ...
    #[error("origin transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    /// The origin answered but its body could not be read to the end.
    #[error("origin body error: {0}")]
    Body(Box<dyn std::error::Error + Send + Sync>),
}

/// Trait for calling the origin with a buffered request.
///
/// Framework-agnostic: the engine only needs something that turns an
/// [`OriginRequest`] into an [`OriginResponse`].
///
/// # Examples
///
/// ```rust
/// use memoproxy_core::{OriginRequest, OriginResponse, Upstream, UpstreamError};
/// use std::future::Ready;
///
/// struct Echo;
///
/// impl Upstream for Echo {
///     type Future = Ready<Result<OriginResponse, UpstreamError>>;
///
///     fn call(&self, req: OriginRequest) -> Self::Future {
///         std::future::ready(Ok(OriginResponse {
///             body: req.body,
///             ..Default::default()
///         }))
///     }
/// }
/// ```
pub trait Upstream: Send + Sync {
    /// The future that resolves to the origin response.
    type Future: Future<Output = Result<OriginResponse, UpstreamError>> + Send;

    /// Send the request to the origin.
    fn call(&self, req: OriginRequest) -> Self::Future;
}
