//! Prometheus metrics for the ERP posting services.
//!
//! All metrics follow the naming convention: `erp_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: submissions by outcome, resource requests by status
//! - **Histogram**: posting latency

use lazy_static::lazy_static;
use prometheus::{exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // PURCHASE POSTING METRICS (erp-01)
    // =========================================================================

    /// Submissions by outcome: posted, skipped, unresolved, encoding_error, posting_failed
    pub static ref POSTING_SUBMISSIONS: CounterVec = CounterVec::new(
        Opts::new("erp_posting_submissions_total", "Purchase submissions by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Time spent in the gateway, ledger call included
    pub static ref POSTING_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "erp_posting_duration_seconds",
            "Time spent submitting a purchase to the ledger"
        ).buckets(exponential_buckets(0.001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // RESOURCE API METRICS (erp-02)
    // =========================================================================

    /// Resource requests by resource, operation and response status
    pub static ref RESOURCE_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("erp_resource_requests_total", "Resource API requests"),
        &["resource", "operation", "status"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(POSTING_SUBMISSIONS.clone()),
        Box::new(POSTING_DURATION.clone()),
        Box::new(RESOURCE_REQUESTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

pub fn record_submission(outcome: &str) {
    crate::metric_inc!(POSTING_SUBMISSIONS, &[outcome]);
}

pub fn record_resource_request(resource: &str, operation: &str, status: u16) {
    crate::metric_inc!(RESOURCE_REQUESTS, &[resource, operation, &status.to_string()]);
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_twice() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_submission_counter() {
        record_submission("posted");
        assert!(POSTING_SUBMISSIONS.with_label_values(&["posted"]).get() >= 1.0);
    }

    #[test]
    fn test_encoded_output_contains_metric_names() {
        register_metrics().unwrap();
        record_resource_request("customer-receipt", "count", 200);
        let text = encode_metrics().unwrap();
        assert!(text.contains("erp_resource_requests_total"));
    }

    #[test]
    fn test_histogram_timer() {
        let before = POSTING_DURATION.get_sample_count();
        {
            let _timer = HistogramTimer::new(&POSTING_DURATION);
        }
        assert!(POSTING_DURATION.get_sample_count() > before);
    }

    #[test]
    fn test_time_histogram_macro() {
        let before = POSTING_DURATION.get_sample_count();
        {
            let _timer = crate::time_histogram!(POSTING_DURATION);
        }
        assert!(POSTING_DURATION.get_sample_count() > before);
    }
}
