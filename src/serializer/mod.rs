//! Query string serializer
//!
//! Supports: Indices, Brackets, Repeat, Comma array encodings
//!
//! # Overview
//!
//! A [`Serializer`] turns a params object into a query string. Nested
//! objects use bracket keys (`filter[name]=x`), arrays follow the configured
//! [`ArrayFormat`], and null values are never emitted. The serializer is
//! attached to every composed request so the transport only encodes params
//! when it actually sends them.

mod encoder;
mod types;

pub use encoder::{percent_decode, percent_encode};
pub use types::{ArrayFormat, Serializer, SerializerConfig};
