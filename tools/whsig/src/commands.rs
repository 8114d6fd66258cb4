//! Subcommand implementations.
//!
//! Each command returns the text to print on stdout so it can be tested
//! without capturing the process output.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use webhook_signature::{
    generate_test_header_string, TestHeaderOptions, VerifierConfig, WebhookService,
    WebhookVerificationApi,
};
use webhook_telemetry::record_outcome;

/// Options for `whsig sign`.
pub struct SignArgs<'a> {
    pub payload: &'a Path,
    pub secret: &'a str,
    pub timestamp: Option<i64>,
    pub scheme: Option<&'a str>,
}

/// Options for `whsig verify`.
pub struct VerifyArgs<'a> {
    pub payload: &'a Path,
    pub header: &'a str,
    pub secrets: &'a [String],
    pub tolerance: Option<u64>,
    pub no_tolerance: bool,
}

/// Read the body from a file, or stdin when the path is `-`.
///
/// Bytes are returned untouched; verification is over the raw body.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read payload from stdin")?;
        return Ok(buf);
    }

    fs::read(path).with_context(|| format!("Failed to read payload from {}", path.display()))
}

/// Produce a signature header for the payload.
pub fn sign(args: &SignArgs<'_>) -> Result<String> {
    let payload = read_payload(args.payload)?;

    let mut opts = TestHeaderOptions::new(&payload, args.secret);
    if let Some(timestamp) = args.timestamp {
        opts = opts.timestamp(timestamp);
    }
    if let Some(scheme) = args.scheme {
        opts = opts.scheme(scheme);
    }

    let header = generate_test_header_string(&opts);
    tracing::debug!(bytes = payload.len(), "Signed payload");
    Ok(header)
}

/// Verify the payload and return the decoded event as pretty JSON.
pub fn verify(args: &VerifyArgs<'_>) -> Result<String> {
    if args.secrets.is_empty() {
        bail!("at least one secret is required (--secret or WEBHOOK_SECRET)");
    }

    let mut config = VerifierConfig::from_env().context("Invalid verifier configuration")?;
    if let Some(secs) = args.tolerance {
        config = config.with_tolerance(Duration::from_secs(secs));
    }
    if args.no_tolerance {
        config = config.without_tolerance();
    }
    let service = WebhookService::new(config).context("Invalid verifier configuration")?;

    let payload = read_payload(args.payload)?;
    let secrets: Vec<&[u8]> = args.secrets.iter().map(|s| s.as_bytes()).collect();

    let start = Instant::now();
    let result = service.construct_event_with_secrets(&payload, args.header, &secrets);
    let elapsed = start.elapsed().as_secs_f64();

    let event = match result {
        Ok(event) => {
            record_outcome(None, elapsed);
            event
        }
        Err(e) => {
            record_outcome(Some(e.kind().as_str()), elapsed);
            tracing::info!(reason = %e.kind(), "Webhook rejected");
            return Err(e).context("Webhook verification failed");
        }
    };

    tracing::info!(
        id = event.id().unwrap_or("<none>"),
        event_type = event.event_type().unwrap_or("<none>"),
        "Webhook verified"
    );

    serde_json::to_string_pretty(event.as_value()).context("Failed to render event")
}
