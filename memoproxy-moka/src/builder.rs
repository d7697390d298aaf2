//! Builder for configuring [`MokaBackend`].

use std::time::{Duration, Instant};

use memoproxy_core::{BackendLabel, CacheKey};
use moka::Expiry;
use moka::future::Cache;

use crate::backend::{MokaBackend, StoredValue};

/// Expiration policy that reads the TTL recorded with each write.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Expiration;

impl Expiry<CacheKey, StoredValue> for Expiration {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // A rewrite restarts the clock with the new value's TTL, like SET PX.
        value.ttl
    }
}

/// Builder for creating and configuring a [`MokaBackend`].
///
/// Use [`MokaBackend::builder`] to create a new builder instance.
///
/// ```
/// use memoproxy_moka::MokaBackend;
///
/// let backend = MokaBackend::builder(10_000).label("local").build();
/// ```
pub struct MokaBackendBuilder {
    max_capacity: u64,
    label: BackendLabel,
}

impl MokaBackendBuilder {
    pub(crate) fn new(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            label: BackendLabel::new_static("moka"),
        }
    }

    /// Set a custom label for this backend.
    pub fn label(mut self, label: impl Into<BackendLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds the backend.
    pub fn build(self) -> MokaBackend {
        let cache = Cache::builder()
            .max_capacity(self.max_capacity)
            .expire_after(Expiration)
            .build();
        MokaBackend {
            cache,
            label: self.label,
        }
    }
}
