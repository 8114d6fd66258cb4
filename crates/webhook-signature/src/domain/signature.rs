//! # Signature Computation (HMAC-SHA256)
//!
//! The signed message is `"{timestamp}.{payload}"`: the decimal timestamp,
//! a literal period, and the raw body exactly as received. Binding the
//! timestamp into the MAC stops a captured signature from being replayed
//! under a fresh timestamp.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Separator between the timestamp and the payload in the signed message.
const MESSAGE_SEPARATOR: u8 = b'.';

/// Build the exact bytes that are signed for `timestamp` and `payload`.
pub fn signed_message(timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let timestamp = timestamp.to_string();
    let mut message = Vec::with_capacity(timestamp.len() + 1 + payload.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.push(MESSAGE_SEPARATOR);
    message.extend_from_slice(payload);
    message
}

/// Compute the lowercase hex HMAC-SHA256 signature of `payload` at
/// `timestamp` under `secret`.
pub fn compute_signature(timestamp: i64, payload: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(&[MESSAGE_SEPARATOR]);
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
