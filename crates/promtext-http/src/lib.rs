//! promtext HTTP adapter.
//!
//! Thin collaborators around the core: an axum route that streams the
//! registry rendering in the Prometheus text content type, and a strict
//! YAML config loader for the exporter binary. No metric logic lives here.

pub mod config;
pub mod endpoint;

pub use endpoint::{metrics_response, metrics_router, PROMETHEUS_CONTENT_TYPE};
