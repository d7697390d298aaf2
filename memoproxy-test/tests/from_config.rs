//! The router built from a YAML configuration, as the binary does it.

use std::io::Write;

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use memoproxy_configuration::ServerConfig;
use tempfile::NamedTempFile;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_configured_router_caches_with_moka() {
    let origin = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("configured"))
        .expect(1)
        .mount(&origin)
        .await;

    let mut proxies = NamedTempFile::new().unwrap();
    writeln!(proxies, "svc1: {}", origin.uri()).unwrap();
    proxies.flush().unwrap();

    let yaml = format!(
        r#"
port: "8080"
proxy-path: {}
store:
  type: Moka
  max_capacity: 100
origin-timeout: 5s
"#,
        proxies.path().display()
    );
    let config = ServerConfig::from_yaml(&yaml).unwrap();
    let app = memoproxy_server::build(&config).await.unwrap();

    let mut statuses = Vec::new();
    for _ in 0..2 {
        let request = Request::post("/v1/p/svc1/items")
            .body(Body::from("{\"a\":1}"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        statuses.push(response.headers()["x-cache-status"].clone());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"configured");
    }

    assert_eq!(statuses, ["MISS", "HIT"]);
}
