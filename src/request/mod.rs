//! Request composition module
//!
//! Merges a long-lived [`BaseRequestConfig`] with a per-call
//! [`RequestConfig`] into a transport-ready [`ComposedRequest`].
//!
//! # Merge order
//!
//! 1. Default JSON headers, then base headers, then per-call headers
//! 2. Content-type flags (multipart > urlencoded > xml)
//! 3. Auth tier (basic > bearer > API key)
//! 4. Absolute URL from ordered fragments
//! 5. Method, params, body, serializer, timeout
//!
//! Composition never fails. Bad inputs degrade (an empty URL becomes
//! `http://`, an invalid header is skipped) and the transport rejects what
//! it cannot send.

mod builder;
mod config;
mod fragments;

pub(crate) use builder::insert_header;
pub use builder::{compose_request, ComposedRequest, RequestBody};
pub use config::{BaseRequestConfig, BaseRequestConfigBuilder, RequestConfig};
pub use fragments::{compose_url, strip_fragment};
