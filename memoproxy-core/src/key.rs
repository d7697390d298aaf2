//! Store keys.
//!
//! Every value memoproxy writes lives under one of three key shapes:
//!
//! - `"<fingerprint>"` holds the base64 response body
//! - `"<fingerprint>-header"` holds the base64 JSON header set
//! - `"counter"` holds the liveness counter
//!
//! ```
//! use memoproxy_core::{CacheKey, fingerprint};
//!
//! let fp = fingerprint(b"hello");
//! assert_eq!(CacheKey::body(&fp).as_str(), "5d41402abc4b2a76b9719d911017c592");
//! assert_eq!(
//!     CacheKey::headers(&fp).as_str(),
//!     "5d41402abc4b2a76b9719d911017c592-header"
//! );
//! ```

use std::fmt;

use smol_str::SmolStr;

use crate::Fingerprint;

const HEADER_SUFFIX: &str = "-header";

/// A key in the external store.
///
/// Keys are short (at most 39 bytes) so [`SmolStr`] keeps them inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(SmolStr);

impl CacheKey {
    /// Key of the liveness counter.
    pub const COUNTER: CacheKey = CacheKey(SmolStr::new_static("counter"));

    /// Creates a key from an arbitrary string.
    #[inline]
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self(key.into())
    }

    /// Creates a key from a static string (no allocation).
    #[inline]
    pub const fn new_static(key: &'static str) -> Self {
        Self(SmolStr::new_static(key))
    }

    /// Key of the cached body for a fingerprint.
    pub fn body(fingerprint: &Fingerprint) -> Self {
        Self(SmolStr::from(fingerprint.to_hex()))
    }

    /// Key of the cached header set for a fingerprint.
    pub fn headers(fingerprint: &Fingerprint) -> Self {
        Self(SmolStr::from(format!("{fingerprint}{HEADER_SUFFIX}")))
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CacheKey {
    #[inline]
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl AsRef<str> for CacheKey {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}
