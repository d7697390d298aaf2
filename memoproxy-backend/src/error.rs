//! Error types for store operations.

use thiserror::Error;

/// Error type for store operations.
///
/// This enum categorizes errors that can occur while talking to a store into
/// distinct groups for appropriate handling. A missing key is *not* an error:
/// it is reported as `Ok(None)` by [`Backend::get`](crate::Backend::get).
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal backend error, state or computation error.
    ///
    /// Any error not related to network interaction.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),

    /// Network interaction error.
    ///
    /// Errors occurring during communication with remote stores (e.g., Redis).
    #[error(transparent)]
    ConnectionError(Box<dyn std::error::Error + Send + Sync>),
}

impl BackendError {
    /// Wraps any error as an [`BackendError::InternalError`].
    pub fn internal(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::InternalError(error.into())
    }

    /// Wraps any error as a [`BackendError::ConnectionError`].
    pub fn connection(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::ConnectionError(error.into())
    }
}
