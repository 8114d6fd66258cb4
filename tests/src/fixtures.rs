//! Shared fixtures: a known secret/payload pair with its expected signature,
//! and a sender that signs the way a webhook provider does.

use rand::Rng;
use serde_json::json;
use webhook_signature::{compute_signature, SignedHeader, EXPECTED_SCHEME};

pub const SECRET: &str = "whsec_test";
pub const ROTATED_SECRET: &str = "whsec_rotated";
pub const PAYLOAD: &str = r#"{"id":"evt_1","object":"event"}"#;
pub const TIMESTAMP: i64 = 1_614_556_800;

/// HMAC-SHA256 of `"1614556800." + PAYLOAD` under `SECRET`.
pub const EXPECTED_SIGNATURE: &str =
    "47015ab257d644fb7a3b6eaadb2cf61b99e0c2a050d98dbf7d1e71f3d9ecf181";

/// Same message under `ROTATED_SECRET`.
pub const ROTATED_SIGNATURE: &str =
    "c782f744109201fcf896d35f9833dd3995758147611a3588f99618043e252cdc";

/// Signs deliveries with one or more active secrets, the way a provider
/// does while an endpoint secret is being rolled.
pub struct Sender {
    secrets: Vec<Vec<u8>>,
}

impl Sender {
    pub fn new(secret: &str) -> Self {
        Self {
            secrets: vec![secret.as_bytes().to_vec()],
        }
    }

    /// Start signing with an additional secret as well.
    pub fn roll(mut self, secret: &str) -> Self {
        self.secrets.push(secret.as_bytes().to_vec());
        self
    }

    /// Header carrying one `v1` signature per active secret.
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> String {
        SignedHeader {
            timestamp,
            legacy_signature: None,
            scheme: EXPECTED_SCHEME.to_string(),
            signatures: self
                .secrets
                .iter()
                .map(|secret| compute_signature(timestamp, payload, secret))
                .collect(),
        }
        .to_string()
    }
}

/// An event body shaped like a provider's event object.
pub fn event_payload(id: &str, event_type: &str) -> Vec<u8> {
    let body = json!({
        "id": id,
        "object": "event",
        "type": event_type,
        "created": TIMESTAMP,
        "data": { "object": { "id": "in_1", "amount_paid": 2000 } },
    });
    serde_json::to_vec(&body).unwrap_or_default()
}

/// Random bytes of `size`.
pub fn random_payload(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}
