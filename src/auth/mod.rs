//! Authentication module
//!
//! Supports: Basic, Bearer, API Key
//!
//! Credentials can be set on the base config and on each call. Exactly one
//! tier is applied per request, in priority order basic > bearer > API key,
//! with the per-call value winning inside each tier.

mod resolver;
mod types;

pub use resolver::API_KEY_HEADER;
pub use types::{AuthConfig, BasicAuth, Credentials};
