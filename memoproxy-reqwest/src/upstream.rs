use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use memoproxy_core::{OriginRequest, OriginResponse, Upstream, UpstreamError};
use reqwest::{Client, Url};
use tracing::trace;

/// Upstream that calls the origin with a shared [`reqwest::Client`].
///
/// Cloning is cheap: the client's connection pool is shared.
#[derive(Debug, Clone, Default)]
pub struct ReqwestUpstream {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestUpstream {
    /// Create an upstream over `client`, with no per-request timeout.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Abort origin calls that take longer than `timeout`, body included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Upstream for ReqwestUpstream {
    type Future = Pin<Box<dyn Future<Output = Result<OriginResponse, UpstreamError>> + Send>>;

    fn call(&self, req: OriginRequest) -> Self::Future {
        let client = self.client.clone();
        let timeout = self.timeout;

        Box::pin(async move {
            let url = Url::parse(&req.url)
                .map_err(|e| UpstreamError::InvalidRequest(format!("`{}`: {e}", req.url)))?;

            let mut builder = client
                .request(req.method, url)
                .headers(req.headers)
                .body(req.body);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| UpstreamError::Transport(Box::new(e)))?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|e| UpstreamError::Body(Box::new(e)))?;
            trace!(%status, bytes = body.len(), "origin responded");

            Ok(OriginResponse {
                status,
                headers,
                body,
            })
        })
    }
}
