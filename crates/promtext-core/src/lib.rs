//! promtext core: metric data model and Prometheus text exposition renderer.
//!
//! This crate defines label sets, the three value kinds (counter, gauge,
//! histogram), per-name metric collections, the registry, and the renderer
//! that turns registry state into the text exposition format. It carries no
//! transport or runtime dependencies so it can be embedded anywhere that can
//! drive a synchronous render (an HTTP handler, a serial console, a test).
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every operation either succeeds, returns `Result`, or performs a defined
//! no-op (e.g. non-positive counter increments are dropped silently).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod labels;
pub mod metric;
pub mod registry;
pub mod sink;
pub mod sync;
pub mod value;

mod text;

/// Shared result type.
pub use error::{PromtextError, Result};
pub use labels::LabelSet;
pub use metric::{Counter, CounterSeries, Gauge, GaugeSeries, Histogram, HistogramSeries};
pub use registry::Registry;
pub use sink::{BufferedSink, ByteSink, ChunkSink, IoSink};
pub use sync::SyncRegistry;
pub use value::{GaugeCell, DEFAULT_BUCKETS};
