use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use memoproxy_backend::{Backend, BackendError, BackendResult};
use memoproxy_core::{BackendLabel, CacheKey};

#[derive(Debug, Default)]
pub struct BackendCounters {
    pub read_count: AtomicUsize,
    pub read_hit_count: AtomicUsize,
    pub read_miss_count: AtomicUsize,
    pub write_count: AtomicUsize,
}

impl BackendCounters {
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    pub fn read_hit_count(&self) -> usize {
        self.read_hit_count.load(Ordering::SeqCst)
    }

    pub fn read_miss_count(&self) -> usize {
        self.read_miss_count.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.read_count.store(0, Ordering::SeqCst);
        self.read_hit_count.store(0, Ordering::SeqCst);
        self.read_miss_count.store(0, Ordering::SeqCst);
        self.write_count.store(0, Ordering::SeqCst);
    }
}

/// A stored string and the TTL it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub value: String,
    pub ttl: Option<Duration>,
}

/// In-memory store that records every write and never expires anything.
///
/// TTLs are kept so tests can assert on them instead of waiting.
#[derive(Clone, Debug)]
pub struct MockBackend {
    pub cache: Arc<DashMap<CacheKey, StoredEntry>>,
    pub counters: Arc<BackendCounters>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            counters: Arc::new(BackendCounters::default()),
        }
    }

    pub fn read_count(&self) -> usize {
        self.counters.read_count()
    }

    pub fn read_hit_count(&self) -> usize {
        self.counters.read_hit_count()
    }

    pub fn read_miss_count(&self) -> usize {
        self.counters.read_miss_count()
    }

    pub fn write_count(&self) -> usize {
        self.counters.write_count()
    }

    pub fn reset_counters(&self) {
        self.counters.reset();
    }

    pub fn cache_entry_count(&self) -> usize {
        self.cache.len()
    }

    /// The entry stored under `key`, if any.
    pub fn entry(&self, key: &str) -> Option<StoredEntry> {
        self.cache
            .get(&CacheKey::from(key))
            .map(|entry| entry.value().clone())
    }

    /// Seeds `key` directly, bypassing the counters.
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.cache.insert(
            CacheKey::from(key),
            StoredEntry {
                value: value.into(),
                ttl: None,
            },
        );
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>> {
        self.counters.read_count.fetch_add(1, Ordering::SeqCst);
        let result = self.cache.get(key).map(|v| v.value().value.clone());
        if result.is_some() {
            self.counters.read_hit_count.fetch_add(1, Ordering::SeqCst);
        } else {
            self.counters.read_miss_count.fetch_add(1, Ordering::SeqCst);
        }
        Ok(result)
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: String,
        ttl: Option<Duration>,
    ) -> BackendResult<()> {
        self.counters.write_count.fetch_add(1, Ordering::SeqCst);
        self.cache.insert(key.clone(), StoredEntry { value, ttl });
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("mock")
    }
}

/// Store whose every operation fails with a connection error.
///
/// Failures can be switched off to simulate the store coming back.
#[derive(Clone, Debug)]
pub struct FailingBackend {
    pub failing: Arc<AtomicBool>,
    pub inner: MockBackend,
}

impl Default for FailingBackend {
    fn default() -> Self {
        Self {
            failing: Arc::new(AtomicBool::new(true)),
            inner: MockBackend::new(),
        }
    }
}

impl FailingBackend {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> BackendResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BackendError::connection("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Backend for FailingBackend {
    async fn get(&self, key: &CacheKey) -> BackendResult<Option<String>> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: String,
        ttl: Option<Duration>,
    ) -> BackendResult<()> {
        self.check()?;
        self.inner.set(key, value, ttl).await
    }

    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("failing")
    }
}
