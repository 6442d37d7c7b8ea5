//! Auth configuration types

use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// HTTP Basic credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    /// Username
    pub username: String,
    /// Password
    #[serde(default)]
    pub password: String,
}

impl BasicAuth {
    /// Create basic credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value (`Basic <base64(user:pass)>`)
    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

/// Credential fields shared by base and per-call configs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Basic credentials
    #[serde(default)]
    pub auth: Option<BasicAuth>,
    /// Bearer token
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// API key sent as `x-api-key`
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Credentials {
    /// True when no tier is set
    pub fn is_empty(&self) -> bool {
        self.auth.is_none() && self.bearer_token.is_none() && self.api_key.is_none()
    }
}

/// Authentication resolved for a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// HTTP Basic authentication
    Basic(BasicAuth),

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// API key header
    ApiKey {
        /// The API key value
        key: String,
    },
}
