//! # Signature Header Parsing
//!
//! Splits a header such as `t=1614556800,v1=abc...,v0=def...` into its
//! timestamp and candidate signatures.
//!
//! Keys other than `t`, `v0` and the requested scheme are skipped so a
//! sender can introduce new schemes without breaking older receivers.

use super::entities::{
    SignedHeader, FIELD_SEPARATOR, KEY_VALUE_SEPARATOR, LEGACY_SCHEME, TIMESTAMP_KEY,
};
use super::errors::{HeaderFault, SignatureError};

/// Parse a signature header, collecting every signature for `scheme`.
///
/// # Errors
/// * `MalformedHeader(Empty)` - header is empty or blank
/// * `MalformedHeader(MissingTimestamp)` - no `t=` field
/// * `MalformedHeader(InvalidTimestamp)` - `t=` value is not an integer
/// * `MalformedHeader(NoSignatures)` - no non-empty `<scheme>=` field
pub fn parse_header(header: &str, scheme: &str) -> Result<SignedHeader, SignatureError> {
    if header.trim().is_empty() {
        return Err(HeaderFault::Empty.into());
    }

    let mut timestamp: Option<&str> = None;
    let mut legacy_signature = None;
    let mut signatures = Vec::new();

    for field in header.split(FIELD_SEPARATOR) {
        let Some((key, value)) = field.trim().split_once(KEY_VALUE_SEPARATOR) else {
            continue;
        };

        if key == TIMESTAMP_KEY {
            // Last one wins.
            timestamp = Some(value);
            continue;
        }

        if value.is_empty() {
            continue;
        }

        if key == LEGACY_SCHEME {
            legacy_signature = Some(value.to_string());
        }
        if key == scheme {
            signatures.push(value.to_string());
        }
    }

    let timestamp = timestamp
        .ok_or(HeaderFault::MissingTimestamp)?
        .parse::<i64>()
        .map_err(|_| HeaderFault::InvalidTimestamp)?;

    if signatures.is_empty() {
        return Err(HeaderFault::NoSignatures.into());
    }

    Ok(SignedHeader {
        timestamp,
        legacy_signature,
        scheme: scheme.to_string(),
        signatures,
    })
}
