//! Shared error type across promtext crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromtextError>;

/// Unified error type used by core and the HTTP adapter.
#[derive(Debug, Error)]
pub enum PromtextError {
    /// A metric with the same name is already registered.
    #[error("duplicate metric name: {0}")]
    DuplicateMetric(String),
    /// Config failed strict parsing or validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A byte sink failed to accept output.
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),
}
