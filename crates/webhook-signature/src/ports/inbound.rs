//! # Inbound Ports (Driving Ports / API)
//!
//! Trait that defines the public API of the verifier.

use crate::domain::entities::{SignedHeader, VerifiedEvent};
use crate::domain::errors::{SignatureError, WebhookError};
use crate::domain::test_header::TestHeaderOptions;

/// Primary Webhook Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`) and hold no
/// per-call state: verifying the same inputs twice gives the same verdict.
///
/// Secrets are passed per call and are not retained.
pub trait WebhookVerificationApi: Send + Sync {
    // =========================================================================
    // Event construction
    // =========================================================================

    /// Verify `header` for `payload` and decode the payload as an event.
    ///
    /// # Errors
    /// * `SignatureVerification` - any verification failure; the payload
    ///   is not parsed in that case
    /// * `PayloadDecode` - the signature verified but the body is not JSON
    fn construct_event(
        &self,
        payload: &[u8],
        header: &str,
        secret: &[u8],
    ) -> Result<VerifiedEvent, WebhookError>;

    /// Same as [`construct_event`](Self::construct_event), accepting a
    /// signature made with any of `secrets`.
    fn construct_event_with_secrets(
        &self,
        payload: &[u8],
        header: &str,
        secrets: &[&[u8]],
    ) -> Result<VerifiedEvent, WebhookError>;

    // =========================================================================
    // Lower-level operations
    // =========================================================================

    /// Verify `header` for `payload` without decoding anything.
    fn verify_header(&self, payload: &[u8], header: &str, secret: &[u8])
        -> Result<(), SignatureError>;

    /// Verify against several secrets (receiver-side rotation).
    fn verify_header_with_secrets(
        &self,
        payload: &[u8],
        header: &str,
        secrets: &[&[u8]],
    ) -> Result<(), SignatureError>;

    /// Parse a header for the configured scheme.
    fn parse_header(&self, header: &str) -> Result<SignedHeader, SignatureError>;

    /// Compute the expected signature for `payload` at `timestamp`.
    fn compute_signature(&self, timestamp: i64, payload: &[u8], secret: &[u8]) -> String;

    /// Build a header for fixtures; uses the service clock when the
    /// options carry no timestamp.
    fn generate_test_header(&self, opts: &TestHeaderOptions) -> String;
}
