//! Backend label type for identifying stores in logs and metrics.

use smol_str::SmolStr;
use std::fmt;

/// A label identifying a store backend.
///
/// Shows up in `Backend::label()`, in [`ResponseSource::Backend`] and as the
/// `backend` field of store-related log events.
///
/// [`ResponseSource::Backend`]: crate::ResponseSource::Backend
///
/// # Example
/// ```
/// use memoproxy_core::BackendLabel;
///
/// let label = BackendLabel::new("redis");
/// assert_eq!(label.as_str(), "redis");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackendLabel(SmolStr);

impl BackendLabel {
    /// Creates a new backend label.
    #[inline]
    pub fn new(s: impl Into<SmolStr>) -> Self {
        Self(s.into())
    }

    /// Creates a backend label from a static string (no allocation).
    #[inline]
    pub const fn new_static(s: &'static str) -> Self {
        Self(SmolStr::new_static(s))
    }

    /// Returns the label as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for BackendLabel {
    #[inline]
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl From<String> for BackendLabel {
    #[inline]
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}

impl AsRef<str> for BackendLabel {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}
