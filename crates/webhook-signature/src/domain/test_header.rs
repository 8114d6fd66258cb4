//! # Test Header Generation
//!
//! Builds signature headers in the same wire format the parser accepts,
//! for fixtures and mocked deliveries.

use zeroize::Zeroizing;

use super::entities::{SignedHeader, EXPECTED_SCHEME};
use super::signature::compute_signature;

/// Inputs for [`generate_test_header_at`].
///
/// ```ignore
/// let opts = TestHeaderOptions::new(payload, "whsec_test").timestamp(1_614_556_800);
/// let header = generate_test_header_string(&opts);
/// ```
#[derive(Clone)]
pub struct TestHeaderOptions {
    payload: Vec<u8>,
    secret: Zeroizing<Vec<u8>>,
    timestamp: Option<i64>,
    scheme: String,
    signature: Option<String>,
}

impl TestHeaderOptions {
    /// Options for signing `payload` with `secret`, at the current time,
    /// under the `v1` scheme.
    pub fn new(payload: impl AsRef<[u8]>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            payload: payload.as_ref().to_vec(),
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            timestamp: None,
            scheme: EXPECTED_SCHEME.to_string(),
            signature: None,
        }
    }

    /// Use a fixed timestamp instead of the current time.
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Emit the signature under a different scheme key.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Emit this signature verbatim instead of computing one.
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    fn timestamp_or(&self, now: i64) -> i64 {
        self.timestamp.unwrap_or(now)
    }
}

impl std::fmt::Debug for TestHeaderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestHeaderOptions")
            .field("payload_len", &self.payload.len())
            .field("secret", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .field("scheme", &self.scheme)
            .field("signature", &self.signature)
            .finish()
    }
}

/// Produce `t=<timestamp>,<scheme>=<signature>`.
///
/// `now` is used only when the options carry no timestamp.
pub fn generate_test_header_at(opts: &TestHeaderOptions, now: i64) -> String {
    let timestamp = opts.timestamp_or(now);
    let signature = opts
        .signature
        .clone()
        .unwrap_or_else(|| compute_signature(timestamp, &opts.payload, &opts.secret));

    SignedHeader {
        timestamp,
        legacy_signature: None,
        scheme: opts.scheme.clone(),
        signatures: vec![signature],
    }
    .to_string()
}
