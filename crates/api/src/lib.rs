//! Core types shared across the key-share and signature-algorithm crates.
//!
//! This crate carries the error model, the TLS alert mapping and the
//! shared-secret container. It has no cryptographic dependencies of its own.

pub mod error;
pub mod secret;

pub use error::{Alert, Error, Result};
pub use secret::SharedSecret;
