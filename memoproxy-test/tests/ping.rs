use std::sync::Arc;
use std::time::Duration;

use http::{Method, StatusCode};
use memoproxy_test::{FailingBackend, MockBackend, TestApp};

#[tokio::test]
async fn test_ping_counts_up() {
    let backend = MockBackend::new();
    let app = TestApp::builder().backend(Arc::new(backend.clone())).build();

    for expected in ["1", "2", "3"] {
        let response = app.send(Method::GET, "/v1/ping", "").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.text(), "pong");

        let counter = backend.entry("counter").expect("counter entry");
        assert_eq!(counter.value, expected);
        assert_eq!(counter.ttl, Some(Duration::from_secs(5 * 60 * 60)));
    }
}

#[tokio::test]
async fn test_ping_survives_store_failure() {
    let app = TestApp::builder()
        .backend(Arc::new(FailingBackend::default()))
        .build();

    let response = app.send(Method::GET, "/v1/ping", "").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "pong");
}

#[tokio::test]
async fn test_ping_is_get_only() {
    let app = TestApp::builder().build();
    let response = app.send(Method::POST, "/v1/ping", "").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
