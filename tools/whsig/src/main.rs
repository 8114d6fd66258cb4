//! whsig: sign and verify webhook payloads.
//!
//! ```text
//! whsig sign body.json --secret whsec_... --timestamp 1614556800
//! whsig verify body.json --header 't=...,v1=...' --secret whsec_old --secret whsec_new
//! ```
//!
//! Secrets can also come from `WEBHOOK_SECRET` so they stay out of the
//! process list.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use webhook_telemetry::{encode_metrics, init_telemetry, service_span, TelemetryConfig};

use commands::{SignArgs, VerifyArgs};

/// Sign and verify timestamped HMAC-SHA256 webhook signatures
#[derive(Parser)]
#[command(name = "whsig", version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level filter (overrides WEBHOOK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print Prometheus metrics to stderr before exiting
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print a signature header for a payload
    Sign {
        /// Payload file, or `-` for stdin
        payload: PathBuf,

        /// Signing secret
        #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,

        /// Unix timestamp to sign at (default: now)
        #[arg(long, allow_negative_numbers = true)]
        timestamp: Option<i64>,

        /// Scheme key to emit (default: v1)
        #[arg(long)]
        scheme: Option<String>,
    },

    /// Verify a payload and print the decoded event
    Verify {
        /// Payload file, or `-` for stdin
        payload: PathBuf,

        /// Value of the signature header
        #[arg(long)]
        header: String,

        /// Endpoint secret; repeat to accept several during rotation
        #[arg(long = "secret", env = "WEBHOOK_SECRET", hide_env_values = true)]
        secrets: Vec<String>,

        /// Maximum timestamp age in seconds (overrides WEBHOOK_TOLERANCE_SECS)
        #[arg(long, conflicts_with = "no_tolerance")]
        tolerance: Option<u64>,

        /// Skip the timestamp freshness check
        #[arg(long)]
        no_tolerance: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        config = config.with_log_level(level.as_str());
    }
    if let Err(e) = init_telemetry(&config) {
        eprintln!("Warning: telemetry disabled: {e}");
    }
    let _service = service_span(&config).entered();

    let outcome = run(&args);

    if args.metrics {
        match encode_metrics() {
            Ok(text) => eprint!("{text}"),
            Err(e) => eprintln!("Warning: failed to encode metrics: {e}"),
        }
    }

    match outcome {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    match &args.command {
        Command::Sign {
            payload,
            secret,
            timestamp,
            scheme,
        } => commands::sign(&SignArgs {
            payload,
            secret,
            timestamp: *timestamp,
            scheme: scheme.as_deref(),
        }),
        Command::Verify {
            payload,
            header,
            secrets,
            tolerance,
            no_tolerance,
        } => commands::verify(&VerifyArgs {
            payload,
            header,
            secrets,
            tolerance: *tolerance,
            no_tolerance: *no_tolerance,
        }),
    }
}
