//! Prometheus metrics for webhook verification.
//!
//! All metrics follow the naming convention: `webhook_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: verifications by result, failures by reason
//! - **Histogram**: time spent per verification

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total verifications
    pub static ref VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("webhook_verifications_total", "Total webhook signature verifications"),
        &["result"]  // result: valid/invalid
    ).expect("metric creation failed");

    /// Failures by reason (for alerting)
    pub static ref VERIFICATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new(
            "webhook_verification_failures_total",
            "Webhook verification failures by reason"
        ),
        &["reason"]  // reason: malformed_header/signature_mismatch/timestamp_expired/...
    ).expect("metric creation failed");

    /// Verification duration
    pub static ref VERIFICATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "webhook_verification_duration_seconds",
            "Time spent verifying webhook signatures"
        ).buckets(exponential_buckets(0.000_001, 2.0, 16).expect("valid bucket layout"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics already present are left alone.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(VERIFICATIONS.clone()),
        Box::new(VERIFICATION_FAILURES.clone()),
        Box::new(VERIFICATION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Record one verification outcome.
///
/// `failure` is `None` for an accepted signature, otherwise the failure
/// label (for example `"signature_mismatch"`).
pub fn record_outcome(failure: Option<&str>, seconds: f64) {
    VERIFICATION_DURATION.observe(seconds);
    match failure {
        None => crate::metric_inc!(VERIFICATIONS, &["valid"]),
        Some(reason) => {
            crate::metric_inc!(VERIFICATIONS, &["invalid"]);
            crate::metric_inc!(VERIFICATION_FAILURES, &[reason]);
        }
    }
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
