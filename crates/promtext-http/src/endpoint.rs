//! Metrics HTTP endpoint.
//!
//! Installs a GET handler that renders the registry through a `ChunkSink`
//! and answers with a chunked streaming body, so large registries never
//! need a single contiguous response allocation.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use futures_util::stream;

use promtext_core::{ChunkSink, SyncRegistry};

/// Prometheus text exposition content type.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
struct EndpointState {
    registry: SyncRegistry,
    chunk_bytes: usize,
}

/// Router exposing the registry at `path`.
pub fn metrics_router(registry: SyncRegistry, path: &str, chunk_bytes: usize) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(EndpointState {
            registry,
            chunk_bytes,
        })
}

async fn metrics_handler(State(state): State<EndpointState>) -> Response {
    metrics_response(&state.registry, state.chunk_bytes)
}

/// Build the metrics response: 200 with the Prometheus content type and the
/// rendering streamed as body chunks, or 500 when the render fails.
pub fn metrics_response(registry: &SyncRegistry, chunk_bytes: usize) -> Response {
    let mut sink = ChunkSink::new(chunk_bytes);
    if let Err(e) = registry.render_into(&mut sink) {
        tracing::error!(error = %e, "metrics render failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "metrics render failed").into_response();
    }

    let chunks = sink.finish();
    let body = Body::from_stream(stream::iter(chunks.into_iter().map(Ok::<_, Infallible>)));

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
