//! HMAC-SHA256 signer

use super::types::{RequestSigner, SignerConfig};
use crate::error::{Error, Result};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub(super) type HmacSha256 = Hmac<Sha256>;

/// Signs request bodies with a shared secret
#[derive(Debug, Clone)]
pub struct HmacSigner {
    config: SignerConfig,
}

impl HmacSigner {
    /// Create a signer from config
    pub fn new(config: SignerConfig) -> Self {
        Self { config }
    }

    /// Create a signer with the default header
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(SignerConfig::new(secret))
    }

    /// Header name the signature is sent in
    pub fn header(&self) -> &str {
        &self.config.header
    }

    /// Whether a secret is configured
    pub fn is_enabled(&self) -> bool {
        !self.config.secret_key.is_empty()
    }

    /// Sign `body` with the current time
    pub fn sign(&self, body: &str) -> Result<String> {
        self.sign_at(body, Utc::now().timestamp())
    }

    /// Sign `body` as if at `timestamp` (unix seconds)
    pub fn sign_at(&self, body: &str, timestamp: i64) -> Result<String> {
        let digest = hmac_hex(&self.config.secret_key, timestamp, body)?;
        Ok(format!("t={timestamp},v1={digest}"))
    }
}

impl RequestSigner for HmacSigner {
    fn signature_headers(&self, body: &str) -> Result<Vec<(String, String)>> {
        if !self.is_enabled() {
            return Ok(Vec::new());
        }
        Ok(vec![(self.config.header.clone(), self.sign(body)?)])
    }
}

/// Hex HMAC-SHA256 of `<timestamp>.<body>`
pub(super) fn hmac_hex(secret: &str, timestamp: i64, body: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| Error::signature(format!("Failed to create HMAC: {e}")))?;
    mac.update(format!("{timestamp}.{body}").as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
