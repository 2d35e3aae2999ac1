//! Per-name metric collections and the typed public handles.
//!
//! A metric owns one ordered mapping from label set to value. Series are
//! created lazily on first access and render in label-set order, so output
//! is reproducible across renders for the same state. A metric with no
//! stored series is invisible in the output (no HELP/TYPE either).

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::labels::LabelSet;
use crate::sink::ByteSink;
use crate::value::{GaugeBinding, GaugeCell, MetricPoint};
use crate::Result;

/// Value kind of a metric; histograms carry their fixed bucket thresholds.
pub(crate) enum MetricKind {
    Counter,
    Gauge,
    Histogram(Arc<[f64]>),
}

impl MetricKind {
    fn type_name(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram(_) => "histogram",
        }
    }

    fn new_point(&self) -> MetricPoint {
        match self {
            MetricKind::Counter => MetricPoint::counter(),
            MetricKind::Gauge => MetricPoint::gauge(),
            MetricKind::Histogram(buckets) => MetricPoint::histogram(Arc::clone(buckets)),
        }
    }
}

/// Shared state behind every typed handle for one metric name.
pub(crate) struct MetricCore {
    name: String,
    help: String,
    kind: MetricKind,
    series: RwLock<BTreeMap<LabelSet, Arc<MetricPoint>>>,
}

impl MetricCore {
    pub(crate) fn new(name: String, help: String, kind: MetricKind) -> Self {
        Self {
            name,
            help,
            kind,
            series: RwLock::new(BTreeMap::new()),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn help(&self) -> &str {
        &self.help
    }

    /// Look up the series for `labels`, creating it lazily. Never fails.
    fn point(&self, labels: &LabelSet) -> Arc<MetricPoint> {
        {
            let series = self.series.read().unwrap_or_else(|e| e.into_inner());
            if let Some(point) = series.get(labels) {
                return Arc::clone(point);
            }
        }

        let mut series = self.series.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(
            series
                .entry(labels.clone())
                .or_insert_with(|| Arc::new(self.kind.new_point())),
        )
    }

    /// Erase series. With `exact_match`, only the exact key; otherwise every
    /// stored series whose key extends the partial `labels` argument.
    fn remove(&self, labels: &LabelSet, exact_match: bool) {
        let mut series = self.series.write().unwrap_or_else(|e| e.into_inner());
        if exact_match {
            series.remove(labels);
        } else {
            series.retain(|key, _| !labels.is_subset_of(key));
        }
    }

    /// Drop all series. The metric stays registered; HELP/TYPE reappear with
    /// the next observation.
    fn clear(&self) {
        let mut series = self.series.write().unwrap_or_else(|e| e.into_inner());
        series.clear();
    }

    /// Render HELP/TYPE and all series, or nothing when empty.
    pub(crate) fn render_into(&self, sink: &mut dyn ByteSink, global: &LabelSet) -> Result<()> {
        let series = self.series.read().unwrap_or_else(|e| e.into_inner());
        if series.is_empty() {
            return Ok(());
        }

        let header = format!(
            "# HELP {name} {help}\n# TYPE {name} {ty}\n",
            name = self.name,
            help = self.help,
            ty = self.kind.type_name(),
        );
        sink.write_all(header.as_bytes())?;

        for (labels, point) in series.iter() {
            point.render_into(sink, &self.name, global, labels)?;
        }
        Ok(())
    }
}

macro_rules! metric_handle_common {
    () => {
        /// Metric name as registered.
        pub fn name(&self) -> &str {
            self.core.name()
        }

        /// Help text rendered in the `# HELP` line.
        pub fn help(&self) -> &str {
            self.core.help()
        }

        /// Erase series by exact key or by subset match (see
        /// [`LabelSet::is_subset_of`]): with `exact_match` false, every
        /// stored series that extends the partial `labels` is removed.
        pub fn remove(&self, labels: &LabelSet, exact_match: bool) {
            self.core.remove(labels, exact_match);
        }

        /// Erase all series, keeping the metric registered.
        pub fn clear(&self) {
            self.core.clear();
        }
    };
}

/// Handle to a registered counter metric.
#[derive(Clone)]
pub struct Counter {
    core: Arc<MetricCore>,
}

impl Counter {
    pub(crate) fn new(core: Arc<MetricCore>) -> Self {
        Self { core }
    }

    metric_handle_common!();

    /// Increment the default (unlabeled) series by 1.
    pub fn increment(&self) {
        self.increment_by(1.0);
    }

    /// Increment the default series by `delta`; non-positive deltas are
    /// dropped silently.
    pub fn increment_by(&self, delta: f64) {
        self.labeled(&LabelSet::new()).increment_by(delta);
    }

    /// Series view for one label combination, created lazily.
    pub fn labeled(&self, labels: &LabelSet) -> CounterSeries {
        CounterSeries {
            point: self.core.point(labels),
        }
    }
}

/// One counter series (label combination).
pub struct CounterSeries {
    point: Arc<MetricPoint>,
}

impl CounterSeries {
    pub fn increment(&self) {
        self.increment_by(1.0);
    }

    pub fn increment_by(&self, delta: f64) {
        if let MetricPoint::Counter(c) = &*self.point {
            c.increment(delta);
        }
    }

    /// Current accumulated value.
    pub fn value(&self) -> f64 {
        match &*self.point {
            MetricPoint::Counter(c) => c.get(),
            _ => 0.0,
        }
    }
}

/// Handle to a registered gauge metric.
#[derive(Clone)]
pub struct Gauge {
    core: Arc<MetricCore>,
}

impl std::fmt::Debug for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gauge").finish_non_exhaustive()
    }
}

impl Gauge {
    pub(crate) fn new(core: Arc<MetricCore>) -> Self {
        Self { core }
    }

    metric_handle_common!();

    /// Set the default (unlabeled) series.
    pub fn set(&self, value: f64) {
        self.labeled(&LabelSet::new()).set(value);
    }

    /// Series view for one label combination, created lazily.
    pub fn labeled(&self, labels: &LabelSet) -> GaugeSeries {
        GaugeSeries {
            point: self.core.point(labels),
        }
    }
}

/// One gauge series (label combination).
pub struct GaugeSeries {
    point: Arc<MetricPoint>,
}

impl GaugeSeries {
    /// Overwrite the stored value. While a binding is in place the write
    /// still lands, but the bound source takes precedence at read time.
    pub fn set(&self, value: f64) {
        if let MetricPoint::Gauge(g) = &*self.point {
            g.set(value);
        }
    }

    /// Bind reads to a zero-argument callable.
    pub fn bind_fn(&self, source: impl Fn() -> f64 + Send + Sync + 'static) {
        if let MetricPoint::Gauge(g) = &*self.point {
            g.bind(GaugeBinding::Callback(Box::new(source)));
        }
    }

    /// Bind reads to a shared cell. Only a weak reference is kept; the cell's
    /// lifetime stays with the application.
    pub fn bind_cell(&self, cell: &Arc<GaugeCell>) {
        if let MetricPoint::Gauge(g) = &*self.point {
            g.bind(GaugeBinding::Cell(Arc::downgrade(cell)));
        }
    }

    /// Remove any binding; reads return the stored value again.
    pub fn unbind(&self) {
        if let MetricPoint::Gauge(g) = &*self.point {
            g.unbind();
        }
    }

    /// Live value: the bound source if any, else the stored value.
    pub fn value(&self) -> f64 {
        match &*self.point {
            MetricPoint::Gauge(g) => g.get(),
            _ => 0.0,
        }
    }
}

/// Handle to a registered histogram metric.
#[derive(Clone)]
pub struct Histogram {
    core: Arc<MetricCore>,
}

impl Histogram {
    pub(crate) fn new(core: Arc<MetricCore>) -> Self {
        Self { core }
    }

    metric_handle_common!();

    /// Observe into the default (unlabeled) series.
    pub fn observe(&self, value: f64) {
        self.labeled(&LabelSet::new()).observe(value);
    }

    /// Series view for one label combination, created lazily with the
    /// metric's configured buckets.
    pub fn labeled(&self, labels: &LabelSet) -> HistogramSeries {
        HistogramSeries {
            point: self.core.point(labels),
        }
    }
}

/// One histogram series (label combination).
pub struct HistogramSeries {
    point: Arc<MetricPoint>,
}

impl HistogramSeries {
    pub fn observe(&self, value: f64) {
        if let MetricPoint::Histogram(h) = &*self.point {
            h.observe(value);
        }
    }

    /// Total observation count.
    pub fn count(&self) -> u64 {
        match &*self.point {
            MetricPoint::Histogram(h) => h.count(),
            _ => 0,
        }
    }

    /// Sum of all observed values.
    pub fn sum(&self) -> f64 {
        match &*self.point {
            MetricPoint::Histogram(h) => h.sum(),
            _ => 0.0,
        }
    }

    /// (threshold, cumulative count) pairs in ascending threshold order.
    pub fn bucket_counts(&self) -> Vec<(f64, u64)> {
        match &*self.point {
            MetricPoint::Histogram(h) => h.bucket_counts(),
            _ => Vec::new(),
        }
    }
}
