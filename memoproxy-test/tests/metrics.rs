//! Counters and histograms recorded while proxying.

use std::sync::Arc;

use http::Method;
use memoproxy_test::{MockBackend, TestApp};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type SnapshotEntry = (
    CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
);

fn counter(entries: &[SnapshotEntry], name: &str, label: (&str, &str)) -> Option<u64> {
    entries.iter().find_map(|(key, _, _, value)| {
        let matches = key.kind() == MetricKind::Counter
            && key.key().name() == name
            && key
                .key()
                .labels()
                .any(|l| l.key() == label.0 && l.value() == label.1);
        match value {
            DebugValue::Counter(v) if matches => Some(*v),
            _ => None,
        }
    })
}

fn histogram_count(entries: &[SnapshotEntry], name: &str) -> usize {
    entries
        .iter()
        .filter(|(key, ..)| key.kind() == MetricKind::Histogram && key.key().name() == name)
        .map(|(.., value)| match value {
            DebugValue::Histogram(samples) => samples.len(),
            _ => 0,
        })
        .sum()
}

#[test]
fn test_miss_hit_and_degradation_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        // The local recorder is per thread, so everything runs on this one.
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let origin = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/items"))
                .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
                .expect(1)
                .mount(&origin)
                .await;

            let app = TestApp::builder()
                .backend(Arc::new(MockBackend::new()))
                .origin("svc1", origin.uri())
                .build();

            let miss = app.send(Method::POST, "/v1/p/svc1/items", "a").await;
            assert_eq!(miss.cache_status(), Some("MISS"));
            let hit = app.send(Method::POST, "/v1/p/svc1/items", "a").await;
            assert_eq!(hit.cache_status(), Some("HIT"));
            // Unknown key: no origin, and the empty base makes the forward fail.
            let degraded = app.send(Method::POST, "/v1/p/nope/items", "b").await;
            assert_eq!(degraded.cache_status(), Some("MISS"));
        })
    });

    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter(&entries, "memoproxy_cache_miss_total", ("source", "upstream")),
        Some(2)
    );
    assert_eq!(
        counter(&entries, "memoproxy_cache_hit_total", ("source", "mock")),
        Some(1)
    );
    assert_eq!(
        counter(&entries, "memoproxy_degradation_total", ("kind", "config_unavailable")),
        Some(1)
    );
    assert_eq!(
        counter(&entries, "memoproxy_degradation_total", ("kind", "origin_unreachable")),
        Some(1)
    );
    assert_eq!(
        counter(&entries, "memoproxy_degradation_total", ("kind", "store_unavailable")),
        None
    );
    assert_eq!(
        histogram_count(&entries, "memoproxy_upstream_duration_seconds"),
        2
    );
}
