use std::fmt;

use memoproxy_backend::BackendError;
use memoproxy_core::{CodecError, UpstreamError};

/// A per-request failure the engine logged and recovered from.
///
/// The engine never fails a request outright. Each `CacheError` it runs into
/// is attached to the [`ProxyResponse`](crate::ProxyResponse) as a
/// degradation, and the caller decides whether it changes the status code
/// (see [`ErrorPolicy`](crate::ErrorPolicy)).
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The origin key is unknown or the origin mapping could not be read.
    #[error("origin configuration unavailable: {0}")]
    ConfigUnavailable(String),
    /// A store lookup or write failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] BackendError),
    /// The origin could not be reached or its response could not be read.
    #[error("origin unreachable: {0}")]
    OriginUnreachable(#[from] UpstreamError),
    /// A cached payload is malformed, or a payload could not be encoded.
    #[error("cached payload codec failure: {0}")]
    DecodeFailure(#[from] CodecError),
}

impl CacheError {
    /// Returns the discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CacheError::ConfigUnavailable(_) => ErrorKind::ConfigUnavailable,
            CacheError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            CacheError::OriginUnreachable(_) => ErrorKind::OriginUnreachable,
            CacheError::DecodeFailure(_) => ErrorKind::DecodeFailure,
        }
    }
}

/// Fieldless mirror of [`CacheError`], usable as a log field or metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`CacheError::ConfigUnavailable`].
    ConfigUnavailable,
    /// See [`CacheError::StoreUnavailable`].
    StoreUnavailable,
    /// See [`CacheError::OriginUnreachable`].
    OriginUnreachable,
    /// See [`CacheError::DecodeFailure`].
    DecodeFailure,
}

impl ErrorKind {
    /// Snake-case name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConfigUnavailable => "config_unavailable",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::OriginUnreachable => "origin_unreachable",
            ErrorKind::DecodeFailure => "decode_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
