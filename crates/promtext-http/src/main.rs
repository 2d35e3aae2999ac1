//! promtext demo exporter.
//!
//! Loads `promtext.yaml`, registers one counter, one bound gauge, and one
//! histogram, keeps them moving from a background task, and serves the
//! registry on the configured metrics path.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use promtext_core::{GaugeCell, LabelSet, Registry, SyncRegistry};
use promtext_http::{config, endpoint};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("promtext.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let registry = Registry::with_global_labels(cfg.global_labels());

    let counter = registry
        .counter("bar", "Example counter")
        .expect("register bar");
    let gauge = registry.gauge("foo", "Example gauge").expect("register foo");
    let histogram = registry
        .histogram("baz", "Example histogram")
        .expect("register baz");

    // The gauge reads a live cell owned by the application.
    let level = GaugeCell::new(0.0);
    gauge.labeled(&LabelSet::new()).bind_cell(&level);

    tokio::spawn({
        let level = Arc::clone(&level);
        async move {
            let mut tick: u64 = 0;
            loop {
                counter.increment();
                level.set((tick * 37 % 1000) as f64);
                histogram.observe((tick * 7 % 12) as f64);
                tick += 1;
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    });

    let synced = SyncRegistry::new(registry);
    let app = endpoint::metrics_router(synced, &cfg.server.metrics_path, cfg.server.chunk_bytes);

    tracing::info!(%listen, "promtext exporter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
