//! # Webhook Signature Verification
//!
//! Verifies that a webhook body was produced by the holder of a shared
//! secret and is not a stale replay, then hands back the decoded event.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Header parsing, HMAC computation and
//!   verification; pure, the caller supplies the time
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters Layer** (`adapters/`): System and fixed clocks
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Wire Format
//!
//! ```text
//! t=1614556800,v1=5257a869...,v1=<signature under a rotated secret>
//! ```
//!
//! The signed message is `"{t}.{raw body}"`, signed with HMAC-SHA256 and
//! rendered as lowercase hex.
//!
//! ## Security Notes
//!
//! - **Raw bytes only**: verify the body exactly as received; re-serialized
//!   JSON will not match
//! - **Constant-time**: every candidate signature is compared with `subtle`
//!   and the scan never exits early
//! - **Verify before parse**: the payload is never decoded unless the
//!   signature has been accepted
//! - **Secrets**: never logged, never included in errors
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use webhook_signature::construct_event;
//!
//! let event = construct_event(body, signature_header, "whsec_...", Some(Duration::from_secs(300)))?;
//! println!("{:?}", event.event_type());
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::clock::{FixedTimeSource, SystemTimeSource};
pub use domain::config::{VerifierConfig, DEFAULT_MAX_PAYLOAD_BYTES, DEFAULT_TOLERANCE};
pub use domain::entities::{SignedHeader, VerifiedEvent, EXPECTED_SCHEME, LEGACY_SCHEME};
pub use domain::errors::{ConfigError, FailureKind, HeaderFault, SignatureError, WebhookError};
pub use domain::header::parse_header;
pub use domain::signature::{compute_signature, signed_message};
pub use domain::test_header::{generate_test_header_at, TestHeaderOptions};
pub use domain::verifier::{check_freshness, verify_header_at, verify_header_with_secrets_at};
pub use ports::inbound::WebhookVerificationApi;
pub use ports::outbound::TimeSource;
pub use service::{
    construct_event, construct_event_as, generate_test_header_string, verify_header,
    WebhookService,
};
