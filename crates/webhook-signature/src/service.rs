//! # Webhook Verification Service
//!
//! Application service layer that implements the `WebhookVerificationApi`
//! trait, plus free functions for callers that do not need a configured
//! service.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`WebhookVerificationApi`)
//! - Uses the outbound port (`TimeSource`) for the freshness check
//! - Delegates parsing, signing and comparison to the domain layer

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::adapters::clock::SystemTimeSource;
use crate::domain::config::VerifierConfig;
use crate::domain::entities::{SignedHeader, VerifiedEvent, EXPECTED_SCHEME};
use crate::domain::errors::{ConfigError, SignatureError, WebhookError};
use crate::domain::test_header::{generate_test_header_at, TestHeaderOptions};
use crate::domain::{self, signature, verifier};
use crate::ports::inbound::WebhookVerificationApi;
use crate::ports::outbound::TimeSource;

/// Webhook Verification Service.
///
/// Holds configuration and a clock only; secrets are supplied per call.
pub struct WebhookService<T: TimeSource = SystemTimeSource> {
    config: VerifierConfig,
    clock: T,
}

impl WebhookService<SystemTimeSource> {
    /// Create a service using the system clock.
    ///
    /// # Errors
    /// Returns the validation error if `config` is invalid.
    pub fn new(config: VerifierConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl Default for WebhookService<SystemTimeSource> {
    fn default() -> Self {
        Self {
            config: VerifierConfig::default(),
            clock: SystemTimeSource,
        }
    }
}

impl<T: TimeSource> WebhookService<T> {
    /// Create a service with an injected clock.
    pub fn with_time_source(config: VerifierConfig, clock: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify and decode the payload into a caller-defined type.
    pub fn construct_event_as<E: DeserializeOwned>(
        &self,
        payload: &[u8],
        header: &str,
        secret: &[u8],
    ) -> Result<E, WebhookError> {
        self.verify_header(payload, header, secret)?;
        decode_payload(payload)
    }

    fn check_payload_size(&self, payload: &[u8]) -> Result<(), SignatureError> {
        let limit = self.config.max_payload_bytes;
        if payload.len() > limit {
            tracing::debug!(size = payload.len(), limit, "Webhook payload too large");
            return Err(SignatureError::PayloadTooLarge {
                size: payload.len(),
                limit,
            });
        }
        Ok(())
    }
}

impl<T: TimeSource> WebhookVerificationApi for WebhookService<T> {
    fn construct_event(
        &self,
        payload: &[u8],
        header: &str,
        secret: &[u8],
    ) -> Result<VerifiedEvent, WebhookError> {
        self.construct_event_with_secrets(payload, header, &[secret])
    }

    fn construct_event_with_secrets(
        &self,
        payload: &[u8],
        header: &str,
        secrets: &[&[u8]],
    ) -> Result<VerifiedEvent, WebhookError> {
        // Nothing is parsed until the signature has been accepted.
        self.verify_header_with_secrets(payload, header, secrets)?;
        decode_payload(payload).map(VerifiedEvent::new)
    }

    fn verify_header(
        &self,
        payload: &[u8],
        header: &str,
        secret: &[u8],
    ) -> Result<(), SignatureError> {
        self.verify_header_with_secrets(payload, header, &[secret])
    }

    fn verify_header_with_secrets(
        &self,
        payload: &[u8],
        header: &str,
        secrets: &[&[u8]],
    ) -> Result<(), SignatureError> {
        self.check_payload_size(payload)?;
        verifier::verify_header_with_secrets_at(
            payload,
            header,
            &self.config.scheme,
            secrets,
            self.config.tolerance,
            self.clock.now(),
        )
    }

    fn parse_header(&self, header: &str) -> Result<SignedHeader, SignatureError> {
        domain::header::parse_header(header, &self.config.scheme)
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8], secret: &[u8]) -> String {
        signature::compute_signature(timestamp, payload, secret)
    }

    fn generate_test_header(&self, opts: &TestHeaderOptions) -> String {
        generate_test_header_at(opts, self.clock.now())
    }
}

// =============================================================================
// FREE FUNCTIONS (system clock, no payload limit)
// =============================================================================

/// Verify `header` for `payload` and decode the payload as an event.
///
/// `tolerance` of `None` skips the freshness check.
///
/// # Errors
/// * `SignatureVerification` - the payload is never parsed in that case
/// * `PayloadDecode` - the signature verified but the body is not JSON
pub fn construct_event(
    payload: impl AsRef<[u8]>,
    header: &str,
    secret: impl AsRef<[u8]>,
    tolerance: Option<Duration>,
) -> Result<VerifiedEvent, WebhookError> {
    construct_event_as(payload, header, secret, tolerance).map(VerifiedEvent::new)
}

/// Verify and decode the payload into a caller-defined type.
pub fn construct_event_as<E: DeserializeOwned>(
    payload: impl AsRef<[u8]>,
    header: &str,
    secret: impl AsRef<[u8]>,
    tolerance: Option<Duration>,
) -> Result<E, WebhookError> {
    let payload = payload.as_ref();
    verify_header(payload, header, secret, tolerance)?;
    decode_payload(payload)
}

/// Verify `header` for `payload` against the system clock.
pub fn verify_header(
    payload: impl AsRef<[u8]>,
    header: &str,
    secret: impl AsRef<[u8]>,
    tolerance: Option<Duration>,
) -> Result<(), SignatureError> {
    verifier::verify_header_at(
        payload.as_ref(),
        header,
        EXPECTED_SCHEME,
        secret.as_ref(),
        tolerance,
        SystemTimeSource.now(),
    )
}

/// Build `t=<timestamp>,<scheme>=<signature>` for fixtures, defaulting
/// the timestamp to the system clock.
pub fn generate_test_header_string(opts: &TestHeaderOptions) -> String {
    generate_test_header_at(opts, SystemTimeSource.now())
}

fn decode_payload<E: DeserializeOwned>(payload: &[u8]) -> Result<E, WebhookError> {
    serde_json::from_slice(payload).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse verified webhook payload");
        WebhookError::PayloadDecode(e)
    })
}

// =============================================================================
// TESTS
// =============================================================================
