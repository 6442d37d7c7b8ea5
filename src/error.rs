//! Error types for Solidafy Request
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Transport failures are normalized into three shapes, checked in order:
//! a structured server body ([`Error::Api`]), a response without a usable
//! body ([`Error::Response`]), and no response at all ([`Error::Transport`]).

use crate::http::{TransportError, TransportResponse};
use crate::types::Method;
use serde_json::Value;
use thiserror::Error;

/// The main error type for Solidafy Request
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Undefined environment variable in config: {variable}")]
    UndefinedVariable { variable: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: Value },

    #[error("{method} {url} failed with HTTP {status} {status_text}")]
    Response {
        status: u16,
        status_text: String,
        method: Method,
        url: String,
    },

    #[error("Request failed: {message}")]
    Transport { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Signing Errors
    // ============================================================================
    #[error("Signature error: {message}")]
    Signature { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create a generic transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a signature error
    pub fn signature(message: impl Into<String>) -> Self {
        Self::Signature {
            message: message.into(),
        }
    }

    /// Normalize a failed dispatch.
    ///
    /// The server body wins when there is one, then the bare response, then
    /// the transport's own message.
    pub fn from_transport(error: TransportError) -> Self {
        match error.response {
            Some(response) if has_usable_body(&response) => Self::Api {
                status: response.status,
                body: response.data,
            },
            Some(response) => Self::Response {
                status: response.status,
                status_text: response.status_text,
                method: response.method,
                url: response.url,
            },
            None => Self::Transport {
                message: error.message,
            },
        }
    }

    /// HTTP status carried by this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided error body, if any
    pub fn body(&self) -> Option<&Value> {
        match self {
            Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

fn has_usable_body(response: &TransportResponse) -> bool {
    match &response.data {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Result type alias for Solidafy Request
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, data: Value) -> TransportResponse {
        TransportResponse {
            status,
            status_text: "Not Found".to_string(),
            method: Method::GET,
            url: "http://api.test/users/1".to_string(),
            data,
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "Request failed: connection refused");

        let err = Error::Api {
            status: 404,
            body: json!({"message": "missing"}),
        };
        assert_eq!(err.to_string(), r#"HTTP 404: {"message":"missing"}"#);
    }

    #[test]
    fn test_from_transport_prefers_body() {
        let err = Error::from_transport(TransportError::with_response(
            "status 404",
            response(404, json!({"message": "missing"})),
        ));

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(&json!({"message": "missing"})));
    }

    #[test]
    fn test_from_transport_falls_back_to_response() {
        let err = Error::from_transport(TransportError::with_response(
            "status 404",
            response(404, Value::String(String::new())),
        ));

        assert!(matches!(err, Error::Response { status: 404, .. }));
        assert!(err.body().is_none());
        assert_eq!(
            err.to_string(),
            "GET http://api.test/users/1 failed with HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_from_transport_without_response() {
        let err = Error::from_transport(TransportError::new("connection refused"));

        assert!(matches!(err, Error::Transport { .. }));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
