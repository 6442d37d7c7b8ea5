//! HTTP transport module
//!
//! Composed requests are handed to a [`Transport`] for dispatch. The crate
//! ships a reqwest-backed implementation; tests and callers may plug in
//! their own.
//!
//! # Contract
//!
//! - 2xx responses resolve to a [`TransportResponse`]
//! - Other statuses fail with a [`TransportError`] that carries the response
//! - Network failures fail with a [`TransportError`] without a response
//!
//! No retries, backoff or rate limiting happen at this layer.

mod reqwest_transport;
mod transport;

pub use reqwest_transport::ReqwestTransport;
pub use transport::{Transport, TransportError, TransportResponse};
