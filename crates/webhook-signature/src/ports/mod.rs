//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that webhook receivers call
//! - **Outbound (Driven)**: Dependencies this crate needs (a clock)

pub mod inbound;
pub mod outbound;
