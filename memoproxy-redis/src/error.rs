//! Error types for Redis backend operations.
//!
//! All errors convert to [`BackendError`] for uniform handling by the engine.
//!
//! [`BackendError`]: memoproxy_backend::BackendError

use memoproxy_backend::BackendError;
use redis::RedisError;

/// Error type for Redis backend operations.
///
/// # When You'll Encounter This
///
/// - Using [`RedisBackendBuilder::build`] with an invalid connection URL
/// - Performing the first store operation when Redis is unreachable
///   (the connection is established lazily)
/// - Performing store operations when the Redis server returns an error
///
/// [`RedisBackendBuilder::build`]: crate::RedisBackendBuilder::build
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the underlying Redis client.
    #[error("Redis backend error: {0}")]
    Redis(#[from] RedisError),
}

impl From<Error> for BackendError {
    fn from(error: Error) -> Self {
        let Error::Redis(inner) = &error;
        let is_connection = inner.is_io_error()
            || inner.is_connection_refusal()
            || inner.is_connection_dropped()
            || inner.is_timeout();
        if is_connection {
            Self::ConnectionError(Box::new(error))
        } else {
            Self::InternalError(Box::new(error))
        }
    }
}
