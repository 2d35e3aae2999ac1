//! Metric registry: the set of live metrics plus registry-wide labels.
//!
//! Metrics are created through the registry (never constructed standalone),
//! which removes the registration/lifetime hazards of self-registering
//! objects: the registry owns the shared metric state and hands out cheap
//! clone-able typed handles. Membership is kept in a name-ordered map so a
//! render always walks metrics in the same deterministic order.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::error::PromtextError;
use crate::labels::LabelSet;
use crate::metric::{Counter, Gauge, Histogram, MetricCore, MetricKind};
use crate::sink::ByteSink;
use crate::value::DEFAULT_BUCKETS;
use crate::Result;

/// In-process metric registry. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    global_labels: LabelSet,
    metrics: RwLock<BTreeMap<String, Arc<MetricCore>>>,
}

impl Registry {
    /// Registry with no global labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose `global_labels` are merged ahead of per-series labels
    /// into every rendered line.
    pub fn with_global_labels(global_labels: LabelSet) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                global_labels,
                metrics: RwLock::new(BTreeMap::new()),
            }),
        }
    }

    pub fn global_labels(&self) -> &LabelSet {
        &self.inner.global_labels
    }

    /// Create and register a counter. Fails if the name is taken.
    pub fn counter(&self, name: impl Into<String>, help: impl Into<String>) -> Result<Counter> {
        Ok(Counter::new(self.register(
            name.into(),
            help.into(),
            MetricKind::Counter,
        )?))
    }

    /// Create and register a gauge. Fails if the name is taken.
    pub fn gauge(&self, name: impl Into<String>, help: impl Into<String>) -> Result<Gauge> {
        Ok(Gauge::new(self.register(
            name.into(),
            help.into(),
            MetricKind::Gauge,
        )?))
    }

    /// Create and register a histogram with the default buckets.
    pub fn histogram(&self, name: impl Into<String>, help: impl Into<String>) -> Result<Histogram> {
        self.histogram_with_buckets(name, help, &DEFAULT_BUCKETS)
    }

    /// Create and register a histogram with caller-chosen ascending bucket
    /// thresholds. Thresholds are taken as-is; unsorted or duplicate entries
    /// are the caller's responsibility.
    pub fn histogram_with_buckets(
        &self,
        name: impl Into<String>,
        help: impl Into<String>,
        buckets: &[f64],
    ) -> Result<Histogram> {
        Ok(Histogram::new(self.register(
            name.into(),
            help.into(),
            MetricKind::Histogram(buckets.into()),
        )?))
    }

    fn register(&self, name: String, help: String, kind: MetricKind) -> Result<Arc<MetricCore>> {
        let mut metrics = self.inner.metrics.write().unwrap_or_else(|e| e.into_inner());
        if metrics.contains_key(&name) {
            return Err(PromtextError::DuplicateMetric(name));
        }
        tracing::debug!(metric = %name, "metric registered");
        let core = Arc::new(MetricCore::new(name.clone(), help, kind));
        metrics.insert(name, Arc::clone(&core));
        Ok(core)
    }

    /// Remove a metric from the registry. Outstanding handles keep working
    /// but the metric no longer renders. Returns whether it was present.
    pub fn unregister(&self, name: &str) -> bool {
        let mut metrics = self.inner.metrics.write().unwrap_or_else(|e| e.into_inner());
        let removed = metrics.remove(name).is_some();
        if removed {
            tracing::debug!(metric = %name, "metric unregistered");
        }
        removed
    }

    /// Render every metric, in name order, into `sink`. The output has no
    /// registry-level header or footer; empty metrics contribute nothing.
    pub fn render_into(&self, sink: &mut dyn ByteSink) -> Result<()> {
        let metrics = self.inner.metrics.read().unwrap_or_else(|e| e.into_inner());
        for core in metrics.values() {
            core.render_into(sink, &self.inner.global_labels)?;
        }
        Ok(())
    }

    /// Convenience: render into an owned string.
    pub fn render_to_string(&self) -> String {
        let mut buf = Vec::new();
        // Vec sink writes are infallible and the output is UTF-8 by
        // construction.
        let _ = self.render_into(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
