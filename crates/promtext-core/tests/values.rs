//! Value-kind update semantics: counters, gauges (bindings), histograms.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use promtext_core::{GaugeCell, LabelSet, Registry};

#[test]
fn counter_sums_only_positive_deltas() {
    let registry = Registry::new();
    let counter = registry.counter("c", "test").unwrap();
    let series = counter.labeled(&LabelSet::new());

    series.increment_by(2.0);
    series.increment_by(0.0);
    series.increment_by(-5.0);
    series.increment_by(0.5);
    series.increment();

    assert_eq!(series.value(), 3.5);
}

#[test]
fn gauge_set_is_last_write_wins() {
    let registry = Registry::new();
    let gauge = registry.gauge("g", "test").unwrap();
    let series = gauge.labeled(&LabelSet::new());

    series.set(1.0);
    series.set(-7.25);
    assert_eq!(series.value(), -7.25);
}

#[test]
fn bound_gauge_reads_callback_over_stored() {
    let registry = Registry::new();
    let gauge = registry.gauge("g", "test").unwrap();
    let series = gauge.labeled(&LabelSet::new());

    series.set(1.0);
    series.bind_fn(|| 99.0);
    assert_eq!(series.value(), 99.0);

    // Writes still land on the stored slot but stay inert while bound.
    series.set(5.0);
    assert_eq!(series.value(), 99.0);

    series.unbind();
    assert_eq!(series.value(), 5.0);
}

#[test]
fn bound_gauge_cell_tracks_live_value() {
    let registry = Registry::new();
    let gauge = registry.gauge("g", "test").unwrap();
    let series = gauge.labeled(&LabelSet::new());

    let cell = GaugeCell::new(10.0);
    series.bind_cell(&cell);
    assert_eq!(series.value(), 10.0);

    cell.set(20.0);
    assert_eq!(series.value(), 20.0);
}

#[test]
fn dead_cell_falls_back_to_stored_value() {
    let registry = Registry::new();
    let gauge = registry.gauge("g", "test").unwrap();
    let series = gauge.labeled(&LabelSet::new());

    series.set(3.0);
    let cell = GaugeCell::new(42.0);
    series.bind_cell(&cell);
    assert_eq!(series.value(), 42.0);

    // The binding holds only a weak reference and must not keep the cell
    // alive.
    assert_eq!(Arc::strong_count(&cell), 1);
    drop(cell);
    assert_eq!(series.value(), 3.0);
}

#[test]
fn histogram_buckets_are_cumulative() {
    let registry = Registry::new();
    let hist = registry
        .histogram_with_buckets("h", "test", &[1.0, 5.0])
        .unwrap();
    let series = hist.labeled(&LabelSet::new());

    series.observe(0.5);
    series.observe(3.0);
    series.observe(10.0);

    assert_eq!(series.count(), 3);
    assert_eq!(series.sum(), 13.5);
    assert_eq!(series.bucket_counts(), vec![(1.0, 1), (5.0, 2)]);
}

#[test]
fn histogram_count_grows_per_observation_regardless_of_value() {
    let registry = Registry::new();
    let hist = registry
        .histogram_with_buckets("h", "test", &[1.0])
        .unwrap();
    let series = hist.labeled(&LabelSet::new());

    series.observe(f64::MAX);
    series.observe(-1.0);
    series.observe(0.0);
    assert_eq!(series.count(), 3);

    // Boundary observation lands in its bucket (le is inclusive).
    series.observe(1.0);
    assert_eq!(series.bucket_counts(), vec![(1.0, 3)]);
}

#[test]
fn default_buckets_match_reference_list() {
    assert_eq!(promtext_core::DEFAULT_BUCKETS.len(), 14);
    assert_eq!(promtext_core::DEFAULT_BUCKETS[0], 0.005);
    assert_eq!(promtext_core::DEFAULT_BUCKETS[13], 10.0);
}
