//! Prometheus metrics for traderbot.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A registration failure means duplicate
//! metric names, which is a startup bug. These panics only occur on first use
//! of a metric, never on the recording path afterwards.

use crate::error::{TelemetryError, TelemetryResult};
use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_int_counter, CounterVec, Encoder, IntCounter};

/// Tick fetches by outcome (received/missed).
pub static TICKS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "traderbot_ticks_total",
        "Tick fetches from the streaming venue",
        &["outcome"]
    )
    .unwrap()
});

/// Order submissions by outcome (confirmed/rejected/failed).
pub static ORDERS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "traderbot_orders_total",
        "Order submissions to the streaming venue",
        &["outcome"]
    )
    .unwrap()
});

/// Quote requests answered with the 0.0 fallback.
pub static QUOTE_FALLBACKS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "traderbot_quote_fallbacks_total",
        "Quote requests that fell back to 0.0",
        &["venue"]
    )
    .unwrap()
});

/// Asset catalog requests answered with the fallback list.
pub static CATALOG_FALLBACKS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "traderbot_catalog_fallbacks_total",
        "Asset catalog requests that fell back to the default list"
    )
    .unwrap()
});

/// Emitted signals by momentum and (possibly flipped) signal.
pub static SIGNALS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "traderbot_signals_total",
        "Signals computed by the signal engine",
        &["momentum", "signal"]
    )
    .unwrap()
});

/// Scheduler firings.
pub static SCHEDULER_RUNS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "traderbot_scheduler_runs_total",
        "Periodic scheduler firings"
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record a tick received within budget.
    pub fn tick_received() {
        TICKS_TOTAL.with_label_values(&["received"]).inc();
    }

    /// Record a tick fetch that returned nothing.
    pub fn tick_missed() {
        TICKS_TOTAL.with_label_values(&["missed"]).inc();
    }

    pub fn order_confirmed() {
        ORDERS_TOTAL.with_label_values(&["confirmed"]).inc();
    }

    /// Record a venue reply carrying an error.
    pub fn order_rejected() {
        ORDERS_TOTAL.with_label_values(&["rejected"]).inc();
    }

    pub fn order_failed() {
        ORDERS_TOTAL.with_label_values(&["failed"]).inc();
    }

    pub fn quote_fallback(venue: &str) {
        QUOTE_FALLBACKS_TOTAL.with_label_values(&[venue]).inc();
    }

    pub fn catalog_fallback() {
        CATALOG_FALLBACKS_TOTAL.inc();
    }

    pub fn signal_emitted(momentum: &str, signal: &str) {
        SIGNALS_TOTAL.with_label_values(&[momentum, signal]).inc();
    }

    pub fn scheduler_run() {
        SCHEDULER_RUNS_TOTAL.inc();
    }

    /// Render the default registry in Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let encoder = prometheus::TextEncoder::new();
        let families = prometheus::gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
