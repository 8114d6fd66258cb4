//! # Verification Errors
//!
//! Error types for webhook signature verification and event construction.
//!
//! None of these carry the shared secret or the expected digest. The only
//! sender-supplied value echoed back is the header timestamp (through the
//! computed age), which is public anyway.

use std::time::Duration;

use thiserror::Error;

/// Why a signature header could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFault {
    /// The header string was empty or whitespace only.
    Empty,
    /// No `t=` field was present.
    MissingTimestamp,
    /// The `t=` field was not a decimal integer.
    InvalidTimestamp,
    /// No signature entry for the requested scheme.
    NoSignatures,
}

impl std::fmt::Display for HeaderFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "header is empty"),
            Self::MissingTimestamp => write!(f, "no timestamp field"),
            Self::InvalidTimestamp => write!(f, "timestamp is not an integer"),
            Self::NoSignatures => write!(f, "no signatures found with expected scheme"),
        }
    }
}

/// Coarse failure category, stable across releases.
///
/// Used as a metrics label and for branching on a rejection without
/// matching on every variant field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MalformedHeader,
    SignatureMismatch,
    TimestampExpired,
    PayloadTooLarge,
    PayloadDecode,
}

impl FailureKind {
    /// Label form of the kind (`malformed_header`, `signature_mismatch`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedHeader => "malformed_header",
            Self::SignatureMismatch => "signature_mismatch",
            Self::TimestampExpired => "timestamp_expired",
            Self::PayloadTooLarge => "payload_too_large",
            Self::PayloadDecode => "payload_decode",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while verifying a signature header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The header is missing, empty, has no timestamp, or carries no
    /// signature for the requested scheme.
    #[error("Unable to extract timestamp and signatures from header: {0}")]
    MalformedHeader(HeaderFault),

    /// No candidate signature matches the one computed for the payload.
    ///
    /// Usually a wrong secret, or a body that was re-encoded between the
    /// sender and the verifier.
    #[error("No signatures found matching the expected signature for payload")]
    SignatureMismatch,

    /// The signature is authentic but older than the allowed tolerance.
    #[error("Timestamp outside the tolerance zone: {age}s old, tolerance {}s", .tolerance.as_secs())]
    TimestampExpired {
        /// Seconds between the header timestamp and the verifier's clock.
        age: i64,
        /// The tolerance that was exceeded.
        tolerance: Duration,
    },

    /// The body exceeds the configured size limit; no HMAC was computed.
    #[error("Payload too large: {size} bytes exceeds limit of {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
}

impl SignatureError {
    /// Failure category of this error.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedHeader(_) => FailureKind::MalformedHeader,
            Self::SignatureMismatch => FailureKind::SignatureMismatch,
            Self::TimestampExpired { .. } => FailureKind::TimestampExpired,
            Self::PayloadTooLarge { .. } => FailureKind::PayloadTooLarge,
        }
    }
}

impl From<HeaderFault> for SignatureError {
    fn from(fault: HeaderFault) -> Self {
        Self::MalformedHeader(fault)
    }
}

/// Errors returned by event construction.
///
/// Signature failures and decode failures are kept apart: the first means
/// the body did not come from the sender, the second means it did but is
/// not valid JSON.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature verification failed; the payload was never parsed.
    #[error(transparent)]
    SignatureVerification(#[from] SignatureError),

    /// The signature verified but the payload is not valid JSON, or does
    /// not fit the requested type.
    #[error("Webhook payload could not be decoded: {0}")]
    PayloadDecode(#[from] serde_json::Error),
}

impl WebhookError {
    /// Failure category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::SignatureVerification(e) => e.kind(),
            Self::PayloadDecode(_) => FailureKind::PayloadDecode,
        }
    }

    /// The underlying signature error, if this is a verification failure.
    pub fn as_signature_error(&self) -> Option<&SignatureError> {
        match self {
            Self::SignatureVerification(e) => Some(e),
            Self::PayloadDecode(_) => None,
        }
    }
}

/// Invalid verifier configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid signature scheme {0:?}: must be non-empty and contain no ',' or '='")]
    InvalidScheme(String),

    #[error("Tolerance of {0}s exceeds the maximum of {1}s")]
    ToleranceTooLarge(u64, u64),

    #[error("max_payload_bytes cannot be 0")]
    ZeroPayloadLimit,

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
