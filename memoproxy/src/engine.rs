use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::{HeaderMap, Method};
use memoproxy_backend::Backend;
use memoproxy_core::{
    CacheKey, CacheStatus, CachedHeaders, Fingerprint, OriginRequest, OriginResponse,
    ResponseSource, Upstream, decode_body, encode_body, fingerprint,
};
use tracing::{Instrument, debug, debug_span, warn};

use crate::headers;
use crate::metrics;
use crate::policy::PolicyConfig;
use crate::resolver::OriginResolver;
use crate::CacheError;

/// An inbound request, as extracted by the front door.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    /// Origin key, the `{key}` route segment.
    pub key: String,
    /// Raw path suffix after `/v1/p/{key}/`, not decoded.
    pub path: String,
    /// Inbound method.
    pub method: Method,
    /// Inbound headers.
    pub headers: HeaderMap,
    /// Buffered inbound body, possibly partial if reading it failed.
    pub body: Bytes,
}

/// The best-effort answer to a [`ProxyRequest`].
#[derive(Debug)]
pub struct ProxyResponse {
    /// First value of every end-to-end origin header.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
    /// Whether the body was replayed from the store.
    pub status: CacheStatus,
    /// Where the body came from.
    pub source: ResponseSource,
    /// Failures recovered from while producing this response.
    pub degradations: Vec<CacheError>,
}

impl ProxyResponse {
    /// Whether the response was produced without any degradation.
    pub fn is_clean(&self) -> bool {
        self.degradations.is_empty()
    }
}

/// Cache-aside engine: fingerprint, lookup, forward on miss, store, replay on hit.
///
/// All collaborators are injected. The engine never fails: every error is
/// logged, recorded on the response as a degradation, and the request
/// continues with a best-effort value.
///
/// When the origin cannot be reached the client gets an empty miss, and
/// nothing is written to the store: the next request with the same body
/// goes to the origin again instead of replaying the empty answer.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use memoproxy::{PolicyConfig, ProxyCache, StaticOriginResolver};
/// use memoproxy_core::{OriginRequest, OriginResponse, Upstream, UpstreamError};
/// use memoproxy_moka::MokaBackend;
///
/// struct Echo;
///
/// impl Upstream for Echo {
///     type Future = std::future::Ready<Result<OriginResponse, UpstreamError>>;
///
///     fn call(&self, req: OriginRequest) -> Self::Future {
///         std::future::ready(Ok(OriginResponse { body: req.body, ..Default::default() }))
///     }
/// }
///
/// let cache = ProxyCache::new(
///     Arc::new(MokaBackend::builder(1_000).build()),
///     Echo,
///     StaticOriginResolver::new([("svc1", "http://127.0.0.1:9000")]),
///     PolicyConfig::default(),
/// );
/// ```
pub struct ProxyCache<B: ?Sized, U, R> {
    backend: Arc<B>,
    upstream: U,
    resolver: R,
    policy: Arc<PolicyConfig>,
}

impl<B: ?Sized, U, R> Clone for ProxyCache<B, U, R>
where
    U: Clone,
    R: Clone,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            upstream: self.upstream.clone(),
            resolver: self.resolver.clone(),
            policy: self.policy.clone(),
        }
    }
}

impl<B, U, R> ProxyCache<B, U, R>
where
    B: Backend + ?Sized,
    U: Upstream,
    R: OriginResolver,
{
    /// Creates an engine over the given store, origin client and resolver.
    pub fn new(backend: Arc<B>, upstream: U, resolver: R, policy: PolicyConfig) -> Self {
        Self {
            backend,
            upstream,
            resolver,
            policy: Arc::new(policy),
        }
    }

    /// The store this engine reads from and writes to.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Answers one request, from the store when possible.
    pub async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        let span = debug_span!(
            "memoproxy.request",
            key = %request.key,
            path = %request.path,
            method = %request.method,
        );
        let response = self.run(request).instrument(span).await;
        metrics::record_response(response.status, &response.source, &response.degradations);
        response
    }

    async fn run(&self, request: ProxyRequest) -> ProxyResponse {
        let mut degradations = Vec::new();

        let base = match self.resolver.resolve(&request.key).await {
            Ok(base) => base,
            Err(error) => {
                warn!(key = %request.key, %error, "memoproxy.resolve failed; continuing without origin");
                degradations.push(error);
                String::new()
            }
        };

        let fingerprint = fingerprint(&request.body);
        debug!(%fingerprint, "memoproxy.fingerprinted");

        match self.backend.get(&CacheKey::body(&fingerprint)).await {
            Ok(Some(encoded)) => {
                debug!(%fingerprint, "memoproxy.hit");
                return self.replay(&fingerprint, &encoded, degradations).await;
            }
            Ok(None) => debug!(%fingerprint, "memoproxy.miss"),
            Err(error) => {
                warn!(%fingerprint, %error, "memoproxy.lookup failed; treating as miss");
                degradations.push(CacheError::StoreUnavailable(error));
            }
        }

        let url = format!("{base}/{}", request.path);
        let outbound = OriginRequest {
            method: request.method,
            headers: headers::outbound(&request.headers),
            body: request.body,
            url: url.clone(),
        };

        let started = Instant::now();
        let result = self
            .upstream
            .call(outbound)
            .instrument(debug_span!("memoproxy.forward", %url))
            .await;
        metrics::record_upstream_duration(started.elapsed());

        match result {
            Ok(origin) => self.store_and_respond(&fingerprint, origin, degradations).await,
            Err(error) => {
                warn!(%url, %error, "memoproxy.forward failed; answering with an empty response");
                degradations.push(CacheError::OriginUnreachable(error));
                let empty = OriginResponse::default();
                ProxyResponse {
                    headers: empty.headers,
                    body: empty.body,
                    status: CacheStatus::Miss,
                    source: ResponseSource::Upstream,
                    degradations,
                }
            }
        }
    }

    async fn replay(
        &self,
        fingerprint: &Fingerprint,
        encoded: &str,
        mut degradations: Vec<CacheError>,
    ) -> ProxyResponse {
        let body = match decode_body(encoded) {
            Ok(body) => body,
            Err(error) => {
                warn!(%fingerprint, %error, "memoproxy.replay body is not decodable");
                degradations.push(CacheError::DecodeFailure(error));
                Bytes::new()
            }
        };

        let headers = match self.backend.get(&CacheKey::headers(fingerprint)).await {
            Ok(Some(encoded)) => match CachedHeaders::decode(&encoded) {
                Ok(cached) => headers::replayable(cached.first_values()),
                Err(error) => {
                    warn!(%fingerprint, %error, "memoproxy.replay header entry is not decodable");
                    degradations.push(CacheError::DecodeFailure(error));
                    HeaderMap::new()
                }
            },
            Ok(None) => {
                debug!(%fingerprint, "memoproxy.replay header entry missing; body only");
                HeaderMap::new()
            }
            Err(error) => {
                warn!(%fingerprint, %error, "memoproxy.replay header lookup failed");
                degradations.push(CacheError::StoreUnavailable(error));
                HeaderMap::new()
            }
        };

        ProxyResponse {
            headers,
            body,
            status: CacheStatus::Hit,
            source: ResponseSource::Backend(self.backend.label()),
            degradations,
        }
    }

    async fn store_and_respond(
        &self,
        fingerprint: &Fingerprint,
        origin: OriginResponse,
        mut degradations: Vec<CacheError>,
    ) -> ProxyResponse {
        let cached = CachedHeaders::from_header_map(&origin.headers);
        debug!(%fingerprint, origin_status = %origin.status, headers = cached.len(), "memoproxy.store");

        let body_key = CacheKey::body(fingerprint);
        if let Err(error) = self
            .backend
            .set(&body_key, encode_body(&origin.body), Some(self.policy.body_ttl))
            .await
        {
            warn!(key = %body_key, %error, "memoproxy.store body write failed");
            degradations.push(CacheError::StoreUnavailable(error));
        }

        let header_key = CacheKey::headers(fingerprint);
        match cached.encode() {
            Ok(encoded) => {
                if let Err(error) = self
                    .backend
                    .set(&header_key, encoded, Some(self.policy.header_ttl))
                    .await
                {
                    warn!(key = %header_key, %error, "memoproxy.store header write failed");
                    degradations.push(CacheError::StoreUnavailable(error));
                }
            }
            Err(error) => {
                warn!(key = %header_key, %error, "memoproxy.store header set is not encodable");
                degradations.push(CacheError::DecodeFailure(error));
            }
        }

        ProxyResponse {
            headers: headers::replayable(cached.first_values()),
            body: origin.body,
            status: CacheStatus::Miss,
            source: ResponseSource::Upstream,
            degradations,
        }
    }
}
