// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Request
//!
//! Request configuration builder and REST data source over reqwest.
//!
//! ## Features
//!
//! - **Config Merging**: A shared base config and a per-call config compose into one request
//! - **URL Composition**: Base URL, named base URLs and path fragments joined without double slashes
//! - **Auth Tiers**: Basic, bearer token or API key, resolved per call
//! - **Query Strings**: Nested params with indices, brackets, repeat or comma array encoding
//! - **Data Sources**: search / get / create / update / remove plus bulk variants
//! - **Pagination**: Lazy page walking with an optional page cap
//! - **Signing**: HMAC-SHA256 request signatures and verification
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_request::{BaseRequestConfig, DataSource, RequestConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = BaseRequestConfig::builder()
//!         .base_url("https://api.example.com")
//!         .url("users")
//!         .bearer_token("secret")
//!         .logger(true)
//!         .build();
//!
//!     let users: DataSource = DataSource::new(config)?;
//!
//!     // GET https://api.example.com/users/42
//!     let user = users.get(42, RequestConfig::new()).await?;
//!
//!     // GET https://api.example.com/users?page=1&pageSize=30&status=active, then page 2, ...
//!     let mut walker = users.bulk_search(RequestConfig::new().param("status", "active"));
//!     while let Some(batch) = walker.next_batch().await? {
//!         println!("{} users", batch.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          DataSource                          │
//! │  search  search_one  get  create  update  remove  bulk_*     │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬───────────┬──────┴──────┬───────────┬───────────┐
//! │  Request  │   Auth    │ Serializer  │  Signer   │  Logger   │
//! ├───────────┼───────────┼─────────────┼───────────┼───────────┤
//! │ Headers   │ Basic     │ Indices     │ HMAC      │ tracing   │
//! │ URL       │ Bearer    │ Brackets    │ Verify    │ Raw mode  │
//! │ Body      │ API key   │ Repeat      │           │           │
//! │ Timeout   │           │ Comma       │           │           │
//! └───────────┴───────────┴─────────────┴───────────┴───────────┘
//!                                │
//!                      Transport (reqwest)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document error variants and drop this allow

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query string serialization
pub mod serializer;

/// Auth tiers and precedence
pub mod auth;

/// Request signing and verification
pub mod signer;

/// Base and per-call configs and request composition
pub mod request;

/// HTTP transport
pub mod http;

/// Request logging
pub mod logger;

/// Page walking
pub mod pagination;

/// REST data sources
pub mod data_source;

/// Config file loading
pub mod config;

/// Environment interpolation
pub mod template;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, ResultExt};
pub use types::*;

// Re-export commonly used types
pub use data_source::{DataSource, Operation};
pub use http::{ReqwestTransport, Transport, TransportError, TransportResponse};
pub use logger::{RawResponse, RequestLogger, TracingLogger};
pub use pagination::{PageSource, PageWalker, Pagination, PaginationResponse};
pub use request::{compose_request, BaseRequestConfig, ComposedRequest, RequestConfig};
pub use serializer::{ArrayFormat, Serializer};
pub use signer::{HmacSigner, RequestSigner, SignerConfig, Verifier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
