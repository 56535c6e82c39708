//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_vec_with_registry, Counter, CounterVec, HistogramVec, Opts, Registry,
};
use std::sync::Arc;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> =
    Lazy::new(|| Arc::new(Metrics::new().expect("Failed to initialize metrics")));

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Exploration pipeline metrics
    pub explorations_total: CounterVec,
    pub oracle_requests: CounterVec,
    pub oracle_request_duration: HistogramVec,

    // Collection metrics
    pub collection_runs: Counter,
    pub collection_skipped_payloads: Counter,
    pub strategies_collected: Counter,

    // Feedback loop metrics
    pub baselines_recorded: Counter,
    pub strategies_archived: Counter,
    pub ranking_requests: Counter,
    pub decisions_recorded: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let explorations_total = register_counter_vec_with_registry!(
            Opts::new("explorations_total", "Total explorations by final status"),
            &["status"],
            registry
        )?;

        let oracle_requests = register_counter_vec_with_registry!(
            Opts::new("oracle_requests_total", "Total generation oracle requests"),
            &["status"],
            registry
        )?;

        let oracle_request_duration = register_histogram_vec_with_registry!(
            "oracle_request_duration_seconds",
            "Generation oracle request duration in seconds",
            &["operation"],
            registry
        )?;

        let collection_runs = register_counter_with_registry!(
            Opts::new("collection_runs_total", "Total strategy collection passes"),
            registry
        )?;

        let collection_skipped_payloads = register_counter_with_registry!(
            Opts::new(
                "collection_skipped_payloads_total",
                "Exploration payloads skipped as unparseable"
            ),
            registry
        )?;

        let strategies_collected = register_counter_with_registry!(
            Opts::new("strategies_collected_total", "Total strategies collected"),
            registry
        )?;

        let baselines_recorded = register_counter_with_registry!(
            Opts::new("baselines_recorded_total", "Total score baselines recorded"),
            registry
        )?;

        let strategies_archived = register_counter_with_registry!(
            Opts::new("strategies_archived_total", "Total strategies newly archived"),
            registry
        )?;

        let ranking_requests = register_counter_with_registry!(
            Opts::new("ranking_requests_total", "Total ranking reads"),
            registry
        )?;

        let decisions_recorded = register_counter_vec_with_registry!(
            Opts::new("decisions_recorded_total", "Total curator decisions recorded"),
            &["decision"],
            registry
        )?;

        Ok(Self {
            registry,
            explorations_total,
            oracle_requests,
            oracle_request_duration,
            collection_runs,
            collection_skipped_payloads,
            strategies_collected,
            baselines_recorded,
            strategies_archived,
            ranking_requests,
            decisions_recorded,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a finished exploration
    pub fn record_exploration(&self, success: bool) {
        let status = if success { "completed" } else { "failed" };
        self.explorations_total.with_label_values(&[status]).inc();
    }

    /// Record an oracle request outcome
    pub fn record_oracle_request(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.oracle_requests.with_label_values(&[status]).inc();
    }

    /// Record a collection pass
    pub fn record_collection(&self, collected: usize, skipped: usize) {
        self.collection_runs.inc();
        self.strategies_collected.inc_by(collected as f64);
        self.collection_skipped_payloads.inc_by(skipped as f64);
    }

    /// Record a curator decision
    pub fn record_decision(&self, decision: &str) {
        self.decisions_recorded.with_label_values(&[decision]).inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
