//! # Signature Header Verification
//!
//! Pure verification logic: the caller supplies the current time, so
//! everything here is deterministic for a given set of inputs.
//!
//! ## Steps
//!
//! 1. Parse the header (malformed headers fail immediately)
//! 2. Recompute the expected signature over `"{t}.{payload}"`
//! 3. Compare against every candidate in constant time
//! 4. If a tolerance is set, reject timestamps older than it
//!
//! ## Security Notes
//!
//! - Comparisons use `subtle` and the scan never exits early, so timing
//!   does not reveal which candidate (or which secret) matched.
//! - Expected digests are zeroized on drop and never logged.
//! - Future timestamps are accepted; only stale captures are rejected.

use std::time::Duration;

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

use super::entities::SignedHeader;
use super::errors::SignatureError;
use super::header::parse_header;
use super::signature::compute_signature;

/// Verify `header` for `payload` under a single `secret`.
///
/// `now` is the verifier's clock in seconds since the Unix epoch.
/// `tolerance` of `None` disables the freshness check; `Some(ZERO)`
/// requires the timestamp to be no older than the current second.
pub fn verify_header_at(
    payload: &[u8],
    header: &str,
    scheme: &str,
    secret: &[u8],
    tolerance: Option<Duration>,
    now: i64,
) -> Result<(), SignatureError> {
    verify_header_with_secrets_at(payload, header, scheme, &[secret], tolerance, now)
}

/// Verify `header` for `payload`, accepting a signature made with any of
/// `secrets`.
///
/// Used while the receiving side rotates its endpoint secret. Every
/// (secret, signature) pair is compared. An empty `secrets` slice never
/// verifies.
pub fn verify_header_with_secrets_at<S: AsRef<[u8]>>(
    payload: &[u8],
    header: &str,
    scheme: &str,
    secrets: &[S],
    tolerance: Option<Duration>,
    now: i64,
) -> Result<(), SignatureError> {
    let parsed = parse_header(header, scheme).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected webhook signature header");
    })?;

    verify_parsed(payload, &parsed, secrets, tolerance, now)
}

/// Verify an already parsed header.
pub fn verify_parsed<S: AsRef<[u8]>>(
    payload: &[u8],
    header: &SignedHeader,
    secrets: &[S],
    tolerance: Option<Duration>,
    now: i64,
) -> Result<(), SignatureError> {
    let mut matched = Choice::from(0u8);
    for secret in secrets {
        let expected = Zeroizing::new(compute_signature(
            header.timestamp,
            payload,
            secret.as_ref(),
        ));
        matched |= matches_any(expected.as_bytes(), &header.signatures);
    }

    if !bool::from(matched) {
        tracing::debug!(
            timestamp = header.timestamp,
            candidates = header.signatures.len(),
            "Webhook signature mismatch"
        );
        return Err(SignatureError::SignatureMismatch);
    }

    check_freshness(header.timestamp, tolerance, now).inspect_err(|e| {
        tracing::debug!(error = %e, "Webhook signature valid but stale");
    })?;

    tracing::trace!(timestamp = header.timestamp, "Webhook signature verified");
    Ok(())
}

/// Reject `timestamp` if it is more than `tolerance` older than `now`.
///
/// Negative ages (timestamps in the future) always pass.
pub fn check_freshness(
    timestamp: i64,
    tolerance: Option<Duration>,
    now: i64,
) -> Result<(), SignatureError> {
    let Some(tolerance) = tolerance else {
        return Ok(());
    };

    let age = now.saturating_sub(timestamp);
    let limit = i64::try_from(tolerance.as_secs()).unwrap_or(i64::MAX);
    if age > limit {
        return Err(SignatureError::TimestampExpired { age, tolerance });
    }

    Ok(())
}

/// Compare `expected` against every candidate without short-circuiting.
///
/// Length mismatches compare unequal (subtle's slice `ct_eq` checks the
/// length first, which only leaks the length of a public hex digest).
fn matches_any(expected: &[u8], candidates: &[String]) -> Choice {
    candidates
        .iter()
        .fold(Choice::from(0u8), |acc, candidate| {
            acc | expected.ct_eq(candidate.as_bytes())
        })
}
