//! Signer configuration and capability trait

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Header carrying the signature when none is configured
pub const DEFAULT_SIGNATURE_HEADER: &str = "x-signature";

fn default_header() -> String {
    DEFAULT_SIGNATURE_HEADER.to_string()
}

/// Signing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Shared secret; an empty secret disables signing
    pub secret_key: String,
    /// Header name for the signature
    #[serde(default = "default_header")]
    pub header: String,
}

impl SignerConfig {
    /// Create a config with the default header
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            header: default_header(),
        }
    }

    /// Use a different header name
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}

/// Anything that can add signature headers to an outgoing request
pub trait RequestSigner: Send + Sync + std::fmt::Debug {
    /// Headers to attach for a request whose body text is `body`
    fn signature_headers(&self, body: &str) -> Result<Vec<(String, String)>>;
}
