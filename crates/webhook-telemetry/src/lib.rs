//! # Webhook Telemetry
//!
//! Logging and metrics for webhook verification.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter`, JSON or human-readable
//! - **Metrics**: Prometheus counters and a duration histogram
//!
//! ## Usage
//!
//! ```rust,ignore
//! use webhook_telemetry::{init_telemetry, service_span, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config)?;
//!     let _service = service_span(&config).entered();
//!     // Verification logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `webhook-verifier` | Service name in logs |
//! | `WEBHOOK_LOG_LEVEL` | `info` | Log level filter |
//! | `WEBHOOK_JSON_LOGS` | `false` | JSON output |
//! | `WEBHOOK_CONSOLE_OUTPUT` | `true` | Write logs to stderr |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_outcome, register_metrics, VERIFICATIONS,
    VERIFICATION_DURATION, VERIFICATION_FAILURES,
};
pub use tracing_setup::{build_filter, service_span};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global tracing subscriber.
///
/// Call once at startup; a second call fails with
/// [`TelemetryError::TracingInit`].
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    // Metrics first, so the first verification is counted
    register_metrics()?;
    tracing_setup::init_tracing(config)
}

/// Increment one labelled series of a counter vector.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
