//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture; the current
//! time is always passed in by the caller.

pub mod config;
pub mod entities;
pub mod errors;
pub mod header;
pub mod signature;
pub mod test_header;
pub mod verifier;
