//! Metrics declaration and recording.

use std::time::Duration;

use memoproxy_core::{CacheStatus, ResponseSource};

use crate::CacheError;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of cache hit events.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "memoproxy_cache_hit_total",
            "Total number of cache hit events."
        );
        "memoproxy_cache_hit_total"
    };
    /// Track number of cache miss events.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "memoproxy_cache_miss_total",
            "Total number of cache miss events."
        );
        "memoproxy_cache_miss_total"
    };
    /// Track number of degradations by kind.
    pub static ref DEGRADATION_COUNTER: &'static str = {
        metrics::describe_counter!(
            "memoproxy_degradation_total",
            "Total number of per-request failures recovered from, by kind."
        );
        "memoproxy_degradation_total"
    };
    /// Metric of origin call timings.
    pub static ref UPSTREAM_DURATION_HISTOGRAM: &'static str = {
        metrics::describe_histogram!(
            "memoproxy_upstream_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of origin requests in seconds."
        );
        "memoproxy_upstream_duration_seconds"
    };
}

/// Record the outcome of one proxied request.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_response(status: CacheStatus, source: &ResponseSource, degradations: &[CacheError]) {
    let counter = match status {
        CacheStatus::Hit => *CACHE_HIT_COUNTER,
        CacheStatus::Miss => *CACHE_MISS_COUNTER,
    };
    metrics::counter!(counter, "source" => source.as_str().to_string()).increment(1);

    for degradation in degradations {
        metrics::counter!(*DEGRADATION_COUNTER, "kind" => degradation.kind().as_str())
            .increment(1);
    }
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_response(
    _status: CacheStatus,
    _source: &ResponseSource,
    _degradations: &[CacheError],
) {
}

/// Record how long the origin took to answer.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_upstream_duration(duration: Duration) {
    metrics::histogram!(*UPSTREAM_DURATION_HISTOGRAM).record(duration.as_secs_f64());
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_upstream_duration(_duration: Duration) {}
