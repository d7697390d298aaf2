//! JSON error bodies.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{Method, StatusCode, Uri};
use memoproxy::{CacheError, ErrorKind};
use serde::Serialize;

/// Route the envelope is about.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteInfo {
    /// Request path, query excluded.
    pub path: String,
    /// Request method.
    pub method: String,
}

/// `{"message": ..., "info": {"path": ..., "method": ...}}`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Envelope {
    /// Human-readable reason.
    pub message: String,
    /// Route the request was made to.
    pub info: RouteInfo,
}

impl Envelope {
    /// Envelope for a request to `uri` with `method`.
    pub fn new(message: impl Into<String>, method: &Method, uri: &Uri) -> Self {
        Self {
            message: message.into(),
            info: RouteInfo {
                path: uri.path().to_owned(),
                method: method.as_str().to_owned(),
            },
        }
    }

    /// Attaches a status code.
    pub fn with_status(self, status: StatusCode) -> EnvelopeResponse {
        EnvelopeResponse {
            status,
            envelope: self,
        }
    }
}

/// An [`Envelope`] together with the status it is sent with.
#[derive(Debug)]
pub struct EnvelopeResponse {
    status: StatusCode,
    envelope: Envelope,
}

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// Status surfaced for a degradation under the strict error policy.
pub fn status_for(error: &CacheError) -> StatusCode {
    match error.kind() {
        ErrorKind::ConfigUnavailable | ErrorKind::OriginUnreachable => StatusCode::BAD_GATEWAY,
        ErrorKind::DecodeFailure => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::StoreUnavailable => StatusCode::OK,
    }
}

pub(crate) async fn not_found(method: Method, uri: Uri) -> EnvelopeResponse {
    Envelope::new("route not found", &method, &uri).with_status(StatusCode::NOT_FOUND)
}

pub(crate) async fn method_not_allowed(method: Method, uri: Uri) -> EnvelopeResponse {
    Envelope::new("route found, but method not allowed", &method, &uri)
        .with_status(StatusCode::METHOD_NOT_ALLOWED)
}

#[cfg(test)]
mod tests {
    use memoproxy_backend::BackendError;

    use super::*;

    #[test]
    fn test_envelope_shape() {
        let uri: Uri = "/v1/q/anything?x=1".parse().unwrap();
        let envelope = Envelope::new("route not found", &Method::GET, &uri);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({
                "message": "route not found",
                "info": {"path": "/v1/q/anything", "method": "GET"}
            })
        );
    }

    #[test]
    fn test_strict_statuses() {
        assert_eq!(
            status_for(&CacheError::ConfigUnavailable("gone".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&CacheError::from(BackendError::connection("refused"))),
            StatusCode::OK
        );
    }
}
