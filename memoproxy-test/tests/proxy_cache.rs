//! Cache-aside behaviour through the HTTP surface, against a wiremock origin.

use std::sync::Arc;
use std::time::Duration;

use http::{Method, Request, StatusCode};
use memoproxy_test::{MockBackend, TestApp};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BODY_KEY: &str = "bb6cb5c68df4652941caf652a366f2d8";
const HEADER_KEY: &str = "bb6cb5c68df4652941caf652a366f2d8-header";

#[tokio::test]
async fn test_miss_then_hit_calls_origin_once() {
    let origin = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_bytes(b"{\"a\":1}".to_vec()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("{\"items\":[1,2]}", "application/json")
                .insert_header("x-origin", "svc1"),
        )
        .expect(1)
        .mount(&origin)
        .await;

    let backend = MockBackend::new();
    let app = TestApp::builder()
        .backend(Arc::new(backend.clone()))
        .origin("svc1", origin.uri())
        .build();

    let first = app.send(Method::POST, "/v1/p/svc1/items", "{\"a\":1}").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.cache_status(), Some("MISS"));
    assert_eq!(first.text(), "{\"items\":[1,2]}");
    assert_eq!(first.headers["x-origin"], "svc1");

    let second = app.send(Method::POST, "/v1/p/svc1/items", "{\"a\":1}").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.cache_status(), Some("HIT"));
    assert_eq!(second.body, first.body);
    assert_eq!(second.headers["x-origin"], "svc1");
    assert_eq!(second.headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_entries_stored_under_body_fingerprint() {
    let origin = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&origin)
        .await;

    let backend = MockBackend::new();
    let app = TestApp::builder()
        .backend(Arc::new(backend.clone()))
        .origin("svc1", origin.uri())
        .build();

    app.send(Method::POST, "/v1/p/svc1/items", "{\"a\":1}").await;

    let body = backend.entry(BODY_KEY).expect("body entry");
    assert_eq!(body.value, "b2s=");
    assert_eq!(body.ttl, Some(Duration::from_secs(24 * 60 * 60)));

    let headers = backend.entry(HEADER_KEY).expect("header entry");
    assert_eq!(headers.ttl, Some(Duration::from_secs(24 * 60 * 60)));
    assert_eq!(backend.cache_entry_count(), 2);
}

#[tokio::test]
async fn test_binary_body_survives_the_store() {
    let origin = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blob"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 255, 254]))
        .expect(1)
        .mount(&origin)
        .await;

    let backend = MockBackend::new();
    let app = TestApp::builder()
        .backend(Arc::new(backend.clone()))
        .origin("bin", origin.uri())
        .build();

    let first = app.send(Method::POST, "/v1/p/bin/blob", "hello").await;
    let second = app.send(Method::POST, "/v1/p/bin/blob", "hello").await;

    assert_eq!(first.body.as_ref(), &[0u8, 255, 254]);
    assert_eq!(second.body.as_ref(), &[0u8, 255, 254]);
    assert_eq!(second.cache_status(), Some("HIT"));
    assert_eq!(
        backend.entry("5d41402abc4b2a76b9719d911017c592").unwrap().value,
        "AP/+"
    );
}

#[tokio::test]
async fn test_same_body_on_another_path_is_a_hit() {
    let origin = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(200).set_body_string("from first"))
        .expect(1)
        .mount(&origin)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(200).set_body_string("from second"))
        .expect(0)
        .mount(&origin)
        .await;

    let app = TestApp::builder().origin("svc1", origin.uri()).build();

    app.send(Method::POST, "/v1/p/svc1/first", "same").await;
    let response = app.send(Method::GET, "/v1/p/svc1/second", "same").await;

    assert_eq!(response.cache_status(), Some("HIT"));
    assert_eq!(response.text(), "from first");
}

#[tokio::test]
async fn test_forwards_headers_and_drops_query() {
    let origin = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("found"))
        .expect(1)
        .mount(&origin)
        .await;

    let app = TestApp::builder().origin("svc1", origin.uri()).build();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/p/svc1/search?q=rust")
        .header("x-api-key", "secret")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send_request(request).await;

    assert_eq!(response.text(), "found");
    let received = origin.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn test_empty_suffix_reaches_origin_root() {
    let origin = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("root"))
        .expect(1)
        .mount(&origin)
        .await;

    let app = TestApp::builder().origin("svc1", origin.uri()).build();

    let response = app.send(Method::GET, "/v1/p/svc1/", "").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "root");
}

#[tokio::test]
async fn test_origin_status_is_not_replayed() {
    let origin = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&origin)
        .await;

    let app = TestApp::builder().origin("svc1", origin.uri()).build();

    let miss = app.send(Method::POST, "/v1/p/svc1/missing", "q").await;
    let hit = app.send(Method::POST, "/v1/p/svc1/missing", "q").await;

    assert_eq!(miss.status, StatusCode::OK);
    assert_eq!(hit.status, StatusCode::OK);
    assert_eq!(miss.text(), "not here");
    assert_eq!(hit.text(), "not here");
}

#[tokio::test]
async fn test_hit_without_header_entry_replays_body() {
    let backend = MockBackend::new();
    backend.insert(BODY_KEY, "eyJhIjoxfQ==");

    let app = TestApp::builder()
        .backend(Arc::new(backend.clone()))
        .origin("svc1", "http://127.0.0.1:1")
        .build();

    let response = app.send(Method::POST, "/v1/p/svc1/items", "{\"a\":1}").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.cache_status(), Some("HIT"));
    assert_eq!(response.text(), "{\"a\":1}");
    assert!(response.headers.get("content-type").is_none());
}
