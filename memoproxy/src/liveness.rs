use std::sync::Arc;
use std::time::Duration;

use memoproxy_backend::Backend;
use memoproxy_core::CacheKey;
use tracing::{info, warn};

/// Ping counter kept in the store under `counter`.
///
/// Each ping reads the counter, increments it and writes it back with a fresh
/// TTL, so the count restarts from zero once pings stop for longer than the
/// TTL. The read-increment-write is not atomic; concurrent pings may lose
/// increments.
pub struct LivenessCounter<B: ?Sized> {
    backend: Arc<B>,
    ttl: Duration,
}

impl<B: ?Sized> Clone for LivenessCounter<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            ttl: self.ttl,
        }
    }
}

impl<B> LivenessCounter<B>
where
    B: Backend + ?Sized,
{
    /// Creates a counter over `backend` whose value expires after `ttl`.
    pub fn new(backend: Arc<B>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Increments the counter and returns the new value.
    ///
    /// A missing or non-numeric stored value counts as zero. Store failures
    /// are logged and never fail the ping.
    pub async fn ping(&self) -> u64 {
        let key = CacheKey::COUNTER;
        let current = match self.backend.get(&key).await {
            Ok(Some(value)) => value.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!(%value, "liveness counter is not a number; restarting from zero");
                0
            }),
            Ok(None) => 0,
            Err(error) => {
                warn!(%error, "liveness counter read failed");
                0
            }
        };

        let next = current.saturating_add(1);
        if let Err(error) = self.backend.set(&key, next.to_string(), Some(self.ttl)).await {
            warn!(%error, "liveness counter write failed");
        }
        info!(counter = next, "ping");
        next
    }
}
