//! # Integration Test Flows
//!
//! A provider signs a delivery, the receiver verifies it and gets the
//! event back.
//!
//! ## Flows Tested:
//!
//! 1. **Known vector**: fixed secret, payload and timestamp give a fixed header
//! 2. **Delivery**: signed now, verified with the default tolerance
//! 3. **Rotation**: sender-side (two `v1` entries) and receiver-side (two secrets)
//! 4. **Metrics**: outcomes land in the Prometheus registry by reason

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde::Deserialize;
    use webhook_signature::{
        construct_event, generate_test_header_at, generate_test_header_string, parse_header,
        verify_header_at, FailureKind, FixedTimeSource, HeaderFault, SignatureError,
        TestHeaderOptions, VerifierConfig, WebhookService, WebhookVerificationApi,
        DEFAULT_TOLERANCE, EXPECTED_SCHEME,
    };
    use webhook_telemetry::{encode_metrics, record_outcome, register_metrics};

    use crate::fixtures::{
        event_payload, Sender, EXPECTED_SIGNATURE, PAYLOAD, ROTATED_SECRET, ROTATED_SIGNATURE,
        SECRET, TIMESTAMP,
    };

    fn receiver_at(now: i64) -> (WebhookService<Arc<FixedTimeSource>>, Arc<FixedTimeSource>) {
        let clock = Arc::new(FixedTimeSource::new(now));
        let service = WebhookService::with_time_source(VerifierConfig::default(), clock.clone())
            .expect("default config is valid");
        (service, clock)
    }

    // =========================================================================
    // KNOWN VECTOR
    // =========================================================================

    #[test]
    fn test_known_vector_header_and_event() {
        let header = generate_test_header_at(
            &TestHeaderOptions::new(PAYLOAD, SECRET).timestamp(TIMESTAMP),
            0,
        );
        assert_eq!(header, format!("t={TIMESTAMP},v1={EXPECTED_SIGNATURE}"));

        let (receiver, _) = receiver_at(TIMESTAMP + 10);
        let event = receiver
            .construct_event(PAYLOAD.as_bytes(), &header, SECRET.as_bytes())
            .unwrap();

        assert_eq!(event.id(), Some("evt_1"));
        assert_eq!(event.object(), Some("event"));
    }

    #[test]
    fn test_known_vector_with_clock_past_tolerance() {
        let header = format!("t={TIMESTAMP},v1={EXPECTED_SIGNATURE}");
        let (receiver, _) = receiver_at(TIMESTAMP + 301);

        let err = receiver
            .construct_event(PAYLOAD.as_bytes(), &header, SECRET.as_bytes())
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::TimestampExpired);
    }

    // =========================================================================
    // DELIVERY
    // =========================================================================

    #[test]
    fn test_fresh_delivery_through_free_functions() {
        let payload = event_payload("evt_live", "invoice.paid");
        let header = generate_test_header_string(&TestHeaderOptions::new(&payload, SECRET));

        let event = construct_event(&payload, &header, SECRET, Some(DEFAULT_TOLERANCE)).unwrap();

        assert_eq!(event.id(), Some("evt_live"));
        assert_eq!(event.event_type(), Some("invoice.paid"));
        assert_eq!(event.created(), Some(TIMESTAMP));
        let amount = event
            .data()
            .and_then(|d| d.get("object"))
            .and_then(|o| o.get("amount_paid"))
            .and_then(|a| a.as_u64());
        assert_eq!(amount, Some(2000));
    }

    #[test]
    fn test_delivery_decodes_into_caller_type() {
        #[derive(Deserialize)]
        struct InvoiceEvent {
            id: String,
            #[serde(rename = "type")]
            event_type: String,
            data: InvoiceData,
        }

        #[derive(Deserialize)]
        struct InvoiceData {
            object: Invoice,
        }

        #[derive(Deserialize)]
        struct Invoice {
            amount_paid: u64,
        }

        let payload = event_payload("evt_typed", "invoice.paid");
        let header = Sender::new(SECRET).sign(&payload, TIMESTAMP);
        let (receiver, _) = receiver_at(TIMESTAMP);

        let event: InvoiceEvent = receiver
            .construct_event_as(&payload, &header, SECRET.as_bytes())
            .unwrap();

        assert_eq!(event.id, "evt_typed");
        assert_eq!(event.event_type, "invoice.paid");
        assert_eq!(event.data.object.amount_paid, 2000);
    }

    #[test]
    fn test_retry_after_clock_advance() {
        let payload = event_payload("evt_retry", "charge.failed");
        let header = Sender::new(SECRET).sign(&payload, TIMESTAMP);
        let (receiver, clock) = receiver_at(TIMESTAMP);

        assert!(receiver.verify_header(&payload, &header, SECRET.as_bytes()).is_ok());

        // Provider retries deliver a freshly signed header; the old one
        // ages out at the tolerance boundary.
        clock.advance(300);
        assert!(receiver.verify_header(&payload, &header, SECRET.as_bytes()).is_ok());
        clock.advance(1);
        assert!(matches!(
            receiver.verify_header(&payload, &header, SECRET.as_bytes()),
            Err(SignatureError::TimestampExpired { age: 301, .. })
        ));

        let retried = Sender::new(SECRET).sign(&payload, TIMESTAMP + 301);
        assert!(receiver.verify_header(&payload, &retried, SECRET.as_bytes()).is_ok());
    }

    #[test]
    fn test_whitespace_in_header_is_tolerated() {
        let header = format!(" t={TIMESTAMP} , v1={EXPECTED_SIGNATURE} ");

        assert_eq!(
            verify_header_at(
                PAYLOAD.as_bytes(),
                &header,
                EXPECTED_SCHEME,
                SECRET.as_bytes(),
                None,
                TIMESTAMP
            ),
            Ok(())
        );
    }

    // =========================================================================
    // ROTATION
    // =========================================================================

    #[test]
    fn test_sender_side_rotation_header() {
        let header = Sender::new(SECRET).roll(ROTATED_SECRET).sign(PAYLOAD.as_bytes(), TIMESTAMP);
        assert_eq!(
            header,
            format!("t={TIMESTAMP},v1={EXPECTED_SIGNATURE},v1={ROTATED_SIGNATURE}")
        );

        let parsed = parse_header(&header, EXPECTED_SCHEME).unwrap();
        assert_eq!(parsed.signatures.len(), 2);

        // A receiver holding either secret accepts the delivery.
        let (receiver, _) = receiver_at(TIMESTAMP);
        for secret in [SECRET, ROTATED_SECRET] {
            assert!(receiver
                .verify_header(PAYLOAD.as_bytes(), &header, secret.as_bytes())
                .is_ok());
        }
    }

    #[test]
    fn test_receiver_side_rotation() {
        let (receiver, _) = receiver_at(TIMESTAMP);
        let secrets: [&[u8]; 2] = [ROTATED_SECRET.as_bytes(), SECRET.as_bytes()];

        // Old sender, receiver already holds the new secret too.
        let old = Sender::new(SECRET).sign(PAYLOAD.as_bytes(), TIMESTAMP);
        assert!(receiver
            .construct_event_with_secrets(PAYLOAD.as_bytes(), &old, &secrets)
            .is_ok());

        // New sender.
        let new = Sender::new(ROTATED_SECRET).sign(PAYLOAD.as_bytes(), TIMESTAMP);
        assert!(receiver
            .construct_event_with_secrets(PAYLOAD.as_bytes(), &new, &secrets)
            .is_ok());

        // Rotation finished: old secret dropped on the receiver.
        assert_eq!(
            receiver.verify_header(PAYLOAD.as_bytes(), &old, ROTATED_SECRET.as_bytes()),
            Err(SignatureError::SignatureMismatch)
        );
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    #[test]
    fn test_receiver_without_tolerance_accepts_old_deliveries() {
        let config = VerifierConfig::default().without_tolerance();
        let receiver =
            WebhookService::with_time_source(config, FixedTimeSource::new(TIMESTAMP * 2)).unwrap();
        let header = format!("t={TIMESTAMP},v1={EXPECTED_SIGNATURE}");

        assert!(receiver
            .construct_event(PAYLOAD.as_bytes(), &header, SECRET.as_bytes())
            .is_ok());
    }

    #[test]
    fn test_receiver_with_custom_tolerance() {
        let config = VerifierConfig::default().with_tolerance(Duration::from_secs(10));
        let receiver =
            WebhookService::with_time_source(config, FixedTimeSource::new(TIMESTAMP + 11)).unwrap();
        let header = format!("t={TIMESTAMP},v1={EXPECTED_SIGNATURE}");

        assert!(matches!(
            receiver.verify_header(PAYLOAD.as_bytes(), &header, SECRET.as_bytes()),
            Err(SignatureError::TimestampExpired { age: 11, .. })
        ));
    }

    #[test]
    fn test_config_loaded_from_json() {
        let config: VerifierConfig =
            serde_json::from_str(r#"{ "tolerance": 60, "max_payload_bytes": 4096 }"#).unwrap();
        let receiver =
            WebhookService::with_time_source(config, FixedTimeSource::new(TIMESTAMP)).unwrap();

        let oversized = vec![b' '; 4097];
        assert!(matches!(
            receiver.verify_header(&oversized, "t=1,v1=00", SECRET.as_bytes()),
            Err(SignatureError::PayloadTooLarge { size: 4097, limit: 4096 })
        ));
    }

    #[test]
    fn test_empty_header_is_malformed() {
        let (receiver, _) = receiver_at(TIMESTAMP);
        assert_eq!(
            receiver.verify_header(PAYLOAD.as_bytes(), "", SECRET.as_bytes()),
            Err(SignatureError::MalformedHeader(HeaderFault::Empty))
        );
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    #[test]
    fn test_outcomes_recorded_by_reason() {
        register_metrics().unwrap();
        let (receiver, _) = receiver_at(TIMESTAMP);
        let header = format!("t={TIMESTAMP},v1={EXPECTED_SIGNATURE}");

        for (body, secret) in [(PAYLOAD, SECRET), (PAYLOAD, ROTATED_SECRET)] {
            let outcome = receiver.construct_event(body.as_bytes(), &header, secret.as_bytes());
            record_outcome(outcome.err().map(|e| e.kind().as_str()), 0.0001);
        }

        let text = encode_metrics().unwrap();
        assert!(text.contains("webhook_verifications_total{result=\"valid\"}"));
        assert!(text.contains("reason=\"signature_mismatch\""));
        assert!(!text.contains(SECRET));
    }
}
