//! Signature verification

use super::signing::HmacSha256;
use chrono::Utc;
use hmac::Mac;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Regex for the signature header: t=<unixSeconds>,v1=<hex>
static SIGNATURE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^t=(\d+),v1=([a-f0-9]+)$").unwrap());

/// Why a signature was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Missing signature header")]
    Missing,

    #[error("Malformed signature header")]
    Malformed,

    #[error("Invalid signature")]
    Mismatch,

    #[error("Signature expired ({age_seconds}s old)")]
    Expired { age_seconds: i64 },
}

impl VerifyError {
    /// HTTP status a server should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            VerifyError::Missing => 401,
            _ => 403,
        }
    }
}

/// Checks signature headers against a shared secret
#[derive(Debug, Clone)]
pub struct Verifier {
    secret: String,
    tolerance: Option<Duration>,
}

impl Verifier {
    /// Create a verifier without a freshness window
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance: None,
        }
    }

    /// Reject signatures whose timestamp is further than `tolerance` from now
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Verify against the current time
    pub fn verify(&self, signature: Option<&str>, body: &str) -> Result<(), VerifyError> {
        self.verify_at(signature, body, Utc::now().timestamp())
    }

    /// Verify as if the current time were `now` (unix seconds)
    pub fn verify_at(
        &self,
        signature: Option<&str>,
        body: &str,
        now: i64,
    ) -> Result<(), VerifyError> {
        let signature = signature.ok_or(VerifyError::Missing)?;
        let captures = SIGNATURE_REGEX
            .captures(signature)
            .ok_or(VerifyError::Malformed)?;

        let timestamp: i64 = captures[1].parse().map_err(|_| VerifyError::Malformed)?;
        let expected = hex::decode(&captures[2]).map_err(|_| VerifyError::Malformed)?;

        let mut mac =
            HmacSha256::new_from_slice(self.secret.as_bytes()).map_err(|_| VerifyError::Mismatch)?;
        mac.update(format!("{timestamp}.{body}").as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| VerifyError::Mismatch)?;

        if let Some(tolerance) = self.tolerance {
            let age_seconds = now - timestamp;
            if age_seconds.unsigned_abs() > tolerance.as_secs() {
                return Err(VerifyError::Expired { age_seconds });
            }
        }

        Ok(())
    }
}

/// Check `signature` for `body` under `secret`, ignoring its age
pub fn verify_signature(signature: &str, body: &str, secret: &str) -> bool {
    Verifier::new(secret).verify(Some(signature), body).is_ok()
}
