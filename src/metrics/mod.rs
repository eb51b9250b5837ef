//! Metrics collection for observability
//!
//! Core computations stay metric-free; the HTTP layer records outcomes here.

use prometheus::{
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_with_registry, Counter, CounterVec, Encoder, Histogram, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // VIN metrics
    pub vin_normalizations: CounterVec,

    // Valuation metrics
    pub valuations: CounterVec,

    // Fairness metrics
    pub fairness_classifications: CounterVec,

    // Negotiation metrics
    pub negotiation_contexts: Counter,
    pub chat_requests: CounterVec,
    pub chat_request_duration: Histogram,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let vin_normalizations = register_counter_vec_with_registry!(
            Opts::new("vin_normalizations_total", "Total VIN normalizations"),
            &["outcome"],
            registry
        )?;

        let valuations = register_counter_vec_with_registry!(
            Opts::new("valuations_total", "Total buyout valuations"),
            &["recommendation"],
            registry
        )?;

        let fairness_classifications = register_counter_vec_with_registry!(
            Opts::new("fairness_classifications_total", "Total fairness classifications"),
            &["band"],
            registry
        )?;

        let negotiation_contexts = register_counter_with_registry!(
            Opts::new("negotiation_contexts_total", "Total negotiation contexts built"),
            registry
        )?;

        let chat_requests = register_counter_vec_with_registry!(
            Opts::new("chat_requests_total", "Total chat collaborator requests"),
            &["status"],
            registry
        )?;

        let chat_request_duration = register_histogram_with_registry!(
            "chat_request_duration_seconds",
            "Chat collaborator request duration in seconds",
            registry
        )?;

        Ok(Self {
            registry,
            vin_normalizations,
            valuations,
            fairness_classifications,
            negotiation_contexts,
            chat_requests,
            chat_request_duration,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn record_vin(&self, valid: bool) {
        let outcome = if valid { "valid" } else { "invalid" };
        self.vin_normalizations.with_label_values(&[outcome]).inc();
    }

    pub fn record_valuation(&self, recommendation: &str) {
        self.valuations.with_label_values(&[recommendation]).inc();
    }

    pub fn record_classification(&self, band: &str) {
        self.fairness_classifications.with_label_values(&[band]).inc();
    }

    pub fn record_chat(&self, success: bool, duration_secs: f64) {
        let status = if success { "success" } else { "error" };
        self.chat_requests.with_label_values(&[status]).inc();
        self.chat_request_duration.observe(duration_secs);
    }
}
