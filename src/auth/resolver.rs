//! Auth tier resolution
//!
//! Turns a pair of [`Credentials`] into the single [`AuthConfig`] applied
//! to a request.

use super::types::{AuthConfig, BasicAuth, Credentials};
use crate::request::insert_header;
use reqwest::header::{HeaderMap, AUTHORIZATION};

/// Header used for API key authentication
pub const API_KEY_HEADER: &str = "x-api-key";

impl AuthConfig {
    /// Pick the auth tier for one request.
    ///
    /// Tiers are checked basic, bearer, API key. Within a tier the per-call
    /// value shadows the base value; empty strings count as unset.
    pub fn resolve(call: &Credentials, base: &Credentials) -> Self {
        if let Some(auth) = call.auth.as_ref().or(base.auth.as_ref()) {
            return AuthConfig::Basic(auth.clone());
        }

        if let Some(token) = first_present(&call.bearer_token, &base.bearer_token) {
            return AuthConfig::Bearer {
                token: token.to_string(),
            };
        }

        if let Some(key) = first_present(&call.api_key, &base.api_key) {
            return AuthConfig::ApiKey {
                key: key.to_string(),
            };
        }

        AuthConfig::None
    }

    /// Write header-based auth into `headers`.
    ///
    /// Basic credentials are not written here; they are handed back so the
    /// transport can attach them the way it attaches any auth object.
    pub fn apply(&self, headers: &mut HeaderMap) -> Option<BasicAuth> {
        match self {
            AuthConfig::None => None,
            AuthConfig::Basic(auth) => Some(auth.clone()),
            AuthConfig::Bearer { token } => {
                insert_header(headers, AUTHORIZATION.as_str(), &format!("Bearer {token}"));
                None
            }
            AuthConfig::ApiKey { key } => {
                insert_header(headers, API_KEY_HEADER, key);
                None
            }
        }
    }

    /// Check if any auth is configured
    pub fn is_none(&self) -> bool {
        matches!(self, AuthConfig::None)
    }
}

fn first_present<'a>(call: &'a Option<String>, base: &'a Option<String>) -> Option<&'a str> {
    call.as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| base.as_deref().filter(|s| !s.is_empty()))
}
