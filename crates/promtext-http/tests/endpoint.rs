#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::to_bytes;
use axum::http::{header, StatusCode};

use promtext_core::{LabelSet, Registry, SyncRegistry};
use promtext_http::{endpoint, PROMETHEUS_CONTENT_TYPE};

#[tokio::test]
async fn metrics_response_streams_the_rendering() {
    let registry = Registry::with_global_labels(LabelSet::new().with("instance", "dev"));
    let counter = registry.counter("bar", "Example counter").unwrap();
    counter.increment();
    counter.increment();

    let synced = SyncRegistry::new(registry.clone());
    let resp = endpoint::metrics_response(&synced, 32);

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        PROMETHEUS_CONTENT_TYPE
    );

    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, registry.render_to_string().as_bytes());
    assert!(body.ends_with(b"bar{instance=\"dev\"} 2\n"));
}

#[tokio::test]
async fn empty_registry_yields_empty_body() {
    let synced = SyncRegistry::new(Registry::new());
    let resp = endpoint::metrics_response(&synced, 1024);

    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}
