use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use memoproxy::{ErrorPolicy, PolicyConfig, StaticOriginResolver};
use memoproxy_reqwest::ReqwestUpstream;
use memoproxy_server::{AppState, CACHE_STATUS_HEADER, SharedBackend, router};
use tower::ServiceExt;

use crate::mock_backend::MockBackend;

/// A router wired like the binary, driven in-process with `oneshot`.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

/// Buffered response of a [`TestApp`] request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn cache_status(&self) -> Option<&str> {
        self.headers
            .get(CACHE_STATUS_HEADER)
            .and_then(|value| value.to_str().ok())
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }

    /// Sends one request through the router.
    pub async fn send(&self, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body.into())
            .expect("valid test request");
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .expect("response body is readable")
            .to_bytes();
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

pub struct TestAppBuilder {
    backend: SharedBackend,
    origins: Vec<(String, String)>,
    policy: PolicyConfig,
    error_policy: ErrorPolicy,
    upstream: ReqwestUpstream,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            backend: Arc::new(MockBackend::new()),
            origins: Vec::new(),
            policy: PolicyConfig::default(),
            error_policy: ErrorPolicy::default(),
            upstream: ReqwestUpstream::default(),
        }
    }
}

impl TestAppBuilder {
    pub fn backend(mut self, backend: SharedBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn origin(mut self, key: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.origins.push((key.into(), base_url.into()));
        self
    }

    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    pub fn error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    pub fn upstream(mut self, upstream: ReqwestUpstream) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn build(self) -> TestApp {
        let state = AppState::new(
            self.backend,
            self.upstream,
            Arc::new(StaticOriginResolver::new(self.origins)),
            self.policy,
            self.error_policy,
        );
        TestApp {
            router: router(state),
        }
    }
}
