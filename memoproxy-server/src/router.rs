use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use http::{HeaderName, HeaderMap, Method, Uri};
use memoproxy::ProxyRequest;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::body::read_lossy;
use crate::envelope::{self, Envelope};
use crate::state::AppState;

/// Response header telling whether the body came from the store.
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache-status");

const PROXY_PREFIX: &str = "/v1/p/";

/// Origin key and raw path suffix of a proxied request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    /// The `{key}` segment.
    pub key: String,
    /// Everything after `/v1/p/{key}/`, exactly as received.
    pub path: String,
}

impl ProxyTarget {
    /// Splits a request path of the form `/v1/p/{key}/{path}`.
    ///
    /// The suffix is taken from the raw path so percent-escapes and repeated
    /// slashes reach the origin untouched.
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(PROXY_PREFIX)?;
        let (key, suffix) = rest.split_once('/')?;
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_owned(),
            path: suffix.to_owned(),
        })
    }
}

/// Builds the HTTP surface over `state`.
pub fn router(state: AppState) -> Router {
    let proxy_methods: MethodRouter<AppState> = get(proxy)
        .post(proxy)
        .put(proxy)
        .delete(proxy)
        .head(proxy)
        .options(proxy);

    Router::new()
        .route("/v1/ping", get(ping))
        .route("/v1/p/{key}/", proxy_methods.clone())
        .route("/v1/p/{key}/{*path}", proxy_methods)
        .fallback(envelope::not_found)
        .method_not_allowed_fallback(envelope::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping(State(state): State<AppState>) -> &'static str {
    state.liveness.ping().await;
    "pong"
}

async fn proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let Some(target) = ProxyTarget::from_path(uri.path()) else {
        return envelope::not_found(method, uri).await.into_response();
    };

    let request = ProxyRequest {
        key: target.key,
        path: target.path,
        method: method.clone(),
        headers,
        body: read_lossy(body).await,
    };
    let response = state.cache.handle(request).await;

    if let Some(error) = state.error_policy.escalate(&response.degradations) {
        let status = envelope::status_for(error);
        debug!(%status, %error, "escalating degradation");
        return Envelope::new(error.to_string(), &method, &uri)
            .with_status(status)
            .into_response();
    }

    let mut http = Response::new(Body::from(response.body));
    *http.headers_mut() = response.headers;
    http.headers_mut()
        .insert(CACHE_STATUS_HEADER, response.status.header_value());
    http
}
