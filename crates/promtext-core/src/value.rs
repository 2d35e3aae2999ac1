//! Metric value kinds: counter, gauge, and histogram state for one series.
//!
//! The kinds form a closed sum type (`MetricPoint`) — no fourth kind is ever
//! added at runtime. Each slot is atomic so unsynchronized mutation is
//! memory-safe; a render may still observe a histogram mid-update unless the
//! caller serializes mutators through `SyncRegistry::lock`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::labels::LabelSet;
use crate::sink::ByteSink;
use crate::text::{push_f64, push_label_block};
use crate::Result;

/// Default histogram bucket upper bounds (seconds-oriented).
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// `f64` stored as `AtomicU64` bits. Additions use a CAS loop; loads and
/// stores are plain relaxed bit casts.
pub(crate) struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub(crate) fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub(crate) fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub(crate) fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn add(&self, delta: f64) {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }
}

/// A shareable gauge slot an application can hand to `GaugeSeries::bind_cell`.
///
/// The gauge holds only a `Weak` reference, so dropping the last `Arc` on the
/// application side never leaves a dangling read — the series falls back to
/// its stored value.
pub struct GaugeCell(AtomicF64);

impl GaugeCell {
    pub fn new(value: f64) -> Arc<Self> {
        Arc::new(Self(AtomicF64::new(value)))
    }

    pub fn set(&self, value: f64) {
        self.0.set(value);
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }
}

/// External read source for a bound gauge.
pub(crate) enum GaugeBinding {
    /// Zero-argument callable producing the live value.
    Callback(Box<dyn Fn() -> f64 + Send + Sync>),
    /// Weak reference to a shared cell owned by the application.
    Cell(Weak<GaugeCell>),
}

/// Monotonic counter state.
pub(crate) struct CounterValue {
    value: AtomicF64,
}

impl CounterValue {
    fn new() -> Self {
        Self {
            value: AtomicF64::new(0.0),
        }
    }

    /// Add `delta` if positive; non-positive deltas are dropped silently.
    pub(crate) fn increment(&self, delta: f64) {
        if delta > 0.0 {
            self.value.add(delta);
        }
    }

    pub(crate) fn get(&self) -> f64 {
        self.value.get()
    }
}

/// Last-write-wins gauge state with an optional read binding.
pub(crate) struct GaugeValue {
    stored: AtomicF64,
    binding: RwLock<Option<GaugeBinding>>,
}

impl GaugeValue {
    fn new() -> Self {
        Self {
            stored: AtomicF64::new(0.0),
            binding: RwLock::new(None),
        }
    }

    /// Overwrite the stored slot. The write lands even while a binding is in
    /// place; the binding only takes precedence at read time.
    pub(crate) fn set(&self, value: f64) {
        self.stored.set(value);
    }

    pub(crate) fn bind(&self, binding: GaugeBinding) {
        let mut slot = self.binding.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(binding);
    }

    pub(crate) fn unbind(&self) {
        let mut slot = self.binding.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Read the live value: bound source if present, else the stored slot.
    /// A dead weak cell falls back to the stored slot.
    pub(crate) fn get(&self) -> f64 {
        let slot = self.binding.read().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some(GaugeBinding::Callback(f)) => f(),
            Some(GaugeBinding::Cell(weak)) => match weak.upgrade() {
                Some(cell) => cell.get(),
                None => self.stored.get(),
            },
            None => self.stored.get(),
        }
    }
}

/// Histogram state: fixed ascending thresholds, cumulative bucket counts,
/// total observation count, and running sum.
pub(crate) struct HistogramValue {
    thresholds: Arc<[f64]>,
    buckets: Box<[AtomicU64]>,
    count: AtomicU64,
    sum: AtomicF64,
}

impl HistogramValue {
    fn new(thresholds: Arc<[f64]>) -> Self {
        let buckets = thresholds.iter().map(|_| AtomicU64::new(0)).collect();
        Self {
            thresholds,
            buckets,
            count: AtomicU64::new(0),
            sum: AtomicF64::new(0.0),
        }
    }

    /// Record one observation: every bucket whose threshold is `>= value`
    /// gets incremented, plus the total count and sum. O(bucket count).
    pub(crate) fn observe(&self, value: f64) {
        for (threshold, bucket) in self.thresholds.iter().zip(self.buckets.iter()) {
            if value <= *threshold {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.sum.add(value);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub(crate) fn sum(&self) -> f64 {
        self.sum.get()
    }

    /// (threshold, cumulative count) pairs in ascending threshold order.
    pub(crate) fn bucket_counts(&self) -> Vec<(f64, u64)> {
        self.thresholds
            .iter()
            .zip(self.buckets.iter())
            .map(|(t, b)| (*t, b.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Closed union over the three value kinds for one label combination.
pub(crate) enum MetricPoint {
    Counter(CounterValue),
    Gauge(GaugeValue),
    Histogram(HistogramValue),
}

impl MetricPoint {
    pub(crate) fn counter() -> Self {
        Self::Counter(CounterValue::new())
    }

    pub(crate) fn gauge() -> Self {
        Self::Gauge(GaugeValue::new())
    }

    pub(crate) fn histogram(thresholds: Arc<[f64]>) -> Self {
        Self::Histogram(HistogramValue::new(thresholds))
    }

    /// Render this point's exposition line(s) for series `labels`.
    pub(crate) fn render_into(
        &self,
        sink: &mut dyn ByteSink,
        name: &str,
        global: &LabelSet,
        labels: &LabelSet,
    ) -> Result<()> {
        match self {
            Self::Counter(c) => render_simple(sink, name, global, labels, c.get()),
            Self::Gauge(g) => render_simple(sink, name, global, labels, g.get()),
            Self::Histogram(h) => render_histogram(sink, name, global, labels, h),
        }
    }
}

fn render_simple(
    sink: &mut dyn ByteSink,
    name: &str,
    global: &LabelSet,
    labels: &LabelSet,
    value: f64,
) -> Result<()> {
    let mut line = String::new();
    line.push_str(name);
    push_label_block(&mut line, global, labels, None);
    line.push(' ');
    push_f64(&mut line, value);
    line.push('\n');
    sink.write_all(line.as_bytes())
}

/// Histogram line order follows the reference exposition: `_count`, the
/// `+Inf` bucket (always equal to the total count), `_sum`, then one bucket
/// line per threshold ascending.
fn render_histogram(
    sink: &mut dyn ByteSink,
    name: &str,
    global: &LabelSet,
    labels: &LabelSet,
    hist: &HistogramValue,
) -> Result<()> {
    let count = hist.count();

    let mut line = String::new();
    let push_line = |line: &mut String, suffix: &str, value: &str, le: Option<f64>| {
        line.clear();
        line.push_str(name);
        line.push_str(suffix);
        push_label_block(line, global, labels, le);
        line.push(' ');
        line.push_str(value);
        line.push('\n');
    };

    push_line(&mut line, "_count", &count.to_string(), None);
    sink.write_all(line.as_bytes())?;

    push_line(&mut line, "_bucket", &count.to_string(), Some(f64::INFINITY));
    sink.write_all(line.as_bytes())?;

    let mut sum = String::new();
    push_f64(&mut sum, hist.sum());
    push_line(&mut line, "_sum", &sum, None);
    sink.write_all(line.as_bytes())?;

    for (threshold, bucket_count) in hist.bucket_counts() {
        push_line(&mut line, "_bucket", &bucket_count.to_string(), Some(threshold));
        sink.write_all(line.as_bytes())?;
    }

    Ok(())
}
