//! Fuzz target for signature header parsing.
//!
//! Arbitrary header text must produce either a parsed header or a
//! malformed-header error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use webhook_signature::{parse_header, SignatureError, EXPECTED_SCHEME};

fuzz_target!(|header: &str| {
    match parse_header(header, EXPECTED_SCHEME) {
        Ok(parsed) => {
            assert!(!parsed.signatures.is_empty());
            // Rendering a parsed header must parse back to the same value
            let reparsed = parse_header(&parsed.to_string(), EXPECTED_SCHEME)
                .expect("rendered header parses");
            assert_eq!(parsed, reparsed);
        }
        Err(SignatureError::MalformedHeader(_)) => {}
        Err(other) => panic!("parse returned a non-header error: {other:?}"),
    }
});
