//! Transport contract

use crate::request::ComposedRequest;
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use thiserror::Error;

/// Response returned by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Method of the request that produced this response
    pub method: Method,
    /// URL the request was sent to, query string included
    pub url: String,
    /// Decoded body (`Null` when empty)
    pub data: JsonValue,
}

impl TransportResponse {
    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failed dispatch
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TransportError {
    /// What went wrong
    pub message: String,
    /// Response, when the server answered
    pub response: Option<TransportResponse>,
}

impl TransportError {
    /// Failure without a response (network, timeout, invalid URL)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
        }
    }

    /// Failure with a non-2xx response
    pub fn with_response(message: impl Into<String>, response: TransportResponse) -> Self {
        Self {
            message: message.into(),
            response: Some(response),
        }
    }
}

/// Something that can send a composed request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and wait for the response
    async fn dispatch(
        &self,
        request: &ComposedRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}
