//! Verifier configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use webhook_signature::VerifierConfig;
//!
//! let config = VerifierConfig::default()
//!     .with_tolerance(Duration::from_secs(600))
//!     .with_scheme("v1");
//! config.validate()?;
//! ```

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

use super::entities::{EXPECTED_SCHEME, FIELD_SEPARATOR, KEY_VALUE_SEPARATOR, TIMESTAMP_KEY};
use super::errors::ConfigError;

/// Default freshness window: five minutes.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Largest tolerance accepted by [`VerifierConfig::validate`].
pub const MAX_TOLERANCE: Duration = Duration::from_secs(24 * 60 * 60);

/// Default maximum body size checked before any HMAC work: 5 MiB.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Settings for [`crate::WebhookService`].
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Maximum accepted age of a signed timestamp. `None` disables the
    /// freshness check.
    #[serde_as(as = "Option<DurationSeconds<u64>>", no_default)]
    pub tolerance: Option<Duration>,
    /// Signature scheme key to look for in the header.
    pub scheme: String,
    /// Bodies larger than this are rejected unverified.
    pub max_payload_bytes: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            tolerance: Some(DEFAULT_TOLERANCE),
            scheme: EXPECTED_SCHEME.to_string(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl VerifierConfig {
    /// Read overrides from the environment on top of the defaults.
    ///
    /// # Environment Variables
    ///
    /// - `WEBHOOK_TOLERANCE_SECS`: seconds, or `none`/`off` to disable (default: 300)
    /// - `WEBHOOK_SIGNATURE_SCHEME`: scheme key (default: v1)
    /// - `WEBHOOK_MAX_PAYLOAD_BYTES`: body size limit (default: 5242880)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var("WEBHOOK_TOLERANCE_SECS") {
            config.tolerance = parse_tolerance(&value)?;
        }

        if let Ok(value) = env::var("WEBHOOK_SIGNATURE_SCHEME") {
            config.scheme = value;
        }

        if let Ok(value) = env::var("WEBHOOK_MAX_PAYLOAD_BYTES") {
            config.max_payload_bytes =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: "WEBHOOK_MAX_PAYLOAD_BYTES",
                    value: value.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheme.is_empty()
            || self.scheme == TIMESTAMP_KEY
            || self.scheme.contains(FIELD_SEPARATOR)
            || self.scheme.contains(KEY_VALUE_SEPARATOR)
        {
            return Err(ConfigError::InvalidScheme(self.scheme.clone()));
        }

        if let Some(tolerance) = self.tolerance {
            if tolerance > MAX_TOLERANCE {
                return Err(ConfigError::ToleranceTooLarge(
                    tolerance.as_secs(),
                    MAX_TOLERANCE.as_secs(),
                ));
            }
        }

        if self.max_payload_bytes == 0 {
            return Err(ConfigError::ZeroPayloadLimit);
        }

        Ok(())
    }

    /// Builder-style method to set the tolerance
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Builder-style method to disable the freshness check
    pub fn without_tolerance(mut self) -> Self {
        self.tolerance = None;
        self
    }

    /// Builder-style method to set the scheme
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Builder-style method to set the payload size limit
    pub fn with_max_payload_bytes(mut self, limit: usize) -> Self {
        self.max_payload_bytes = limit;
        self
    }
}

fn parse_tolerance(value: &str) -> Result<Option<Duration>, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("off") {
        return Ok(None);
    }

    value
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| ConfigError::InvalidEnv {
            var: "WEBHOOK_TOLERANCE_SECS",
            value: value.to_string(),
        })
}
