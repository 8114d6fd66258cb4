//! # Domain Entities
//!
//! Core data structures for webhook signature verification.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Signature scheme checked by default.
pub const EXPECTED_SCHEME: &str = "v1";

/// Deprecated scheme. Parsed and carried, never used to accept a payload.
pub const LEGACY_SCHEME: &str = "v0";

/// Header key holding the sender's timestamp.
pub const TIMESTAMP_KEY: &str = "t";

/// Separator between header fields.
pub const FIELD_SEPARATOR: char = ',';

/// Separator between a field's key and its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Parsed form of a signature header such as
/// `t=1614556800,v1=5257a869...,v1=2f1b...`.
///
/// The timestamp is whatever the sender claims; it is only trustworthy
/// after a signature over it has been verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedHeader {
    /// Seconds since the Unix epoch, as claimed by the sender.
    pub timestamp: i64,
    /// `v0` value, if present.
    pub legacy_signature: Option<String>,
    /// Scheme the signatures below were collected for.
    pub scheme: String,
    /// Every signature for `scheme`, in header order. Several entries
    /// appear while the sender is rotating secrets; any match is accepted.
    pub signatures: Vec<String>,
}

impl std::fmt::Display for SignedHeader {
    /// Renders the header in wire format: timestamp first, then every
    /// signature for the scheme, then the legacy signature.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{TIMESTAMP_KEY}{KEY_VALUE_SEPARATOR}{}", self.timestamp)?;
        for signature in &self.signatures {
            write!(
                f,
                "{FIELD_SEPARATOR}{}{KEY_VALUE_SEPARATOR}{signature}",
                self.scheme
            )?;
        }
        if let Some(legacy) = &self.legacy_signature {
            if self.scheme != LEGACY_SCHEME {
                write!(f, "{FIELD_SEPARATOR}{LEGACY_SCHEME}{KEY_VALUE_SEPARATOR}{legacy}")?;
            }
        }
        Ok(())
    }
}

/// A webhook event whose signature has been verified.
///
/// The shape is open-ended: the verifier does not know about individual
/// event types, so the payload is kept as a JSON document. Callers that
/// have a typed model can use [`VerifiedEvent::deserialize_into`].
///
/// Only the verifier constructs this type. It serializes but does not
/// implement `Deserialize`, so it cannot be built from unchecked JSON:
///
/// ```compile_fail
/// let forged: webhook_signature::VerifiedEvent =
///     serde_json::from_str(r#"{"id":"evt_1","object":"event"}"#).unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VerifiedEvent {
    payload: Value,
}

impl VerifiedEvent {
    pub(crate) fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// Event identifier (`id` field), e.g. `evt_1`.
    pub fn id(&self) -> Option<&str> {
        self.payload.get("id").and_then(Value::as_str)
    }

    /// Object tag (`object` field), normally `event`.
    pub fn object(&self) -> Option<&str> {
        self.payload.get("object").and_then(Value::as_str)
    }

    /// Event type (`type` field), e.g. `invoice.paid`.
    pub fn event_type(&self) -> Option<&str> {
        self.payload.get("type").and_then(Value::as_str)
    }

    /// Creation time (`created` field) in seconds since the epoch.
    pub fn created(&self) -> Option<i64> {
        self.payload.get("created").and_then(Value::as_i64)
    }

    /// The `data` object carried by the event.
    pub fn data(&self) -> Option<&Value> {
        self.payload.get("data")
    }

    /// Any top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.payload
    }

    pub fn into_value(self) -> Value {
        self.payload
    }

    /// Decode the event into a caller-defined type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}
