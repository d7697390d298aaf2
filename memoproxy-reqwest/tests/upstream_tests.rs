//! ReqwestUpstream against a wiremock origin.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use memoproxy_core::{OriginRequest, Upstream, UpstreamError};
use memoproxy_reqwest::ReqwestUpstream;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(method: Method, url: String, body: &'static [u8]) -> OriginRequest {
    OriginRequest {
        method,
        url,
        headers: HeaderMap::new(),
        body: Bytes::from_static(body),
    }
}

#[tokio::test]
async fn test_forwards_method_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/items/42"))
        .and(header("x-api-key", "secret"))
        .and(body_bytes(b"{\"a\":1}".to_vec()))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_string("created")
                .insert_header("x-origin", "mock"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut req = request(
        Method::PUT,
        format!("{}/items/42", mock_server.uri()),
        b"{\"a\":1}",
    );
    req.headers
        .insert("x-api-key", HeaderValue::from_static("secret"));

    let response = ReqwestUpstream::default().call(req).await.unwrap();

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.headers["x-origin"], "mock");
    assert_eq!(response.body, Bytes::from_static(b"created"));
}

#[tokio::test]
async fn test_keeps_binary_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 255, 254]))
        .mount(&mock_server)
        .await;

    let req = request(Method::POST, format!("{}/raw", mock_server.uri()), b"");
    let response = ReqwestUpstream::default().call(req).await.unwrap();

    assert_eq!(response.body.as_ref(), &[0u8, 255, 254]);
}

#[tokio::test]
async fn test_relative_url_is_invalid_request() {
    let req = request(Method::GET, "/items".to_owned(), b"");
    let error = ReqwestUpstream::default().call(req).await.unwrap_err();
    assert!(matches!(error, UpstreamError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let upstream = ReqwestUpstream::default().with_timeout(Duration::from_millis(100));
    assert_eq!(upstream.timeout(), Some(Duration::from_millis(100)));

    let req = request(Method::GET, format!("{}/slow", mock_server.uri()), b"");
    let error = upstream.call(req).await.unwrap_err();
    assert!(matches!(error, UpstreamError::Transport(_)));
}
