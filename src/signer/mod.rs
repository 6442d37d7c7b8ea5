//! Request signing module
//!
//! Outgoing requests can carry an HMAC-SHA256 signature header of the form
//! `t=<unixSeconds>,v1=<hex>`, computed over `<timestamp>.<body>`. The
//! [`Verifier`] is the receiving side of the same scheme.

mod signing;
mod types;
mod verify;

pub use signing::HmacSigner;
pub use types::{RequestSigner, SignerConfig, DEFAULT_SIGNATURE_HEADER};
pub use verify::{verify_signature, VerifyError, Verifier};
