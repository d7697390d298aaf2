use std::sync::Arc;

use memoproxy::{ErrorPolicy, LivenessCounter, OriginResolver, PolicyConfig, ProxyCache};
use memoproxy_backend::Backend;
use memoproxy_reqwest::ReqwestUpstream;

/// Store shared by the engine and the liveness counter.
pub type SharedBackend = Arc<dyn Backend + Send + 'static>;

/// Engine as wired by the server.
pub type Engine = ProxyCache<dyn Backend + Send + 'static, ReqwestUpstream, Arc<dyn OriginResolver>>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub(crate) cache: Engine,
    pub(crate) liveness: LivenessCounter<dyn Backend + Send + 'static>,
    pub(crate) error_policy: ErrorPolicy,
}

impl AppState {
    /// Wires the engine and the liveness counter over one store.
    pub fn new(
        backend: SharedBackend,
        upstream: ReqwestUpstream,
        resolver: Arc<dyn OriginResolver>,
        policy: PolicyConfig,
        error_policy: ErrorPolicy,
    ) -> Self {
        let liveness = LivenessCounter::new(backend.clone(), policy.counter_ttl);
        Self {
            cache: ProxyCache::new(backend, upstream, resolver, policy),
            liveness,
            error_policy,
        }
    }
}
