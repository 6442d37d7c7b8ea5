//! Logger capability and raw responses

use crate::http::{TransportError, TransportResponse};
use crate::request::ComposedRequest;
use crate::types::{JsonValue, Method};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Status reported by raw responses when the server never answered
pub const FALLBACK_STATUS: u16 = 500;

/// Observer of requests made through a data source
pub trait RequestLogger: Send + Sync + fmt::Debug {
    /// Called right before dispatch
    fn log_request(&self, request: &ComposedRequest);

    /// Called after a 2xx response
    fn log_response(&self, response: &TransportResponse, elapsed: Duration);

    /// Called after any failure
    fn log_error(&self, request: &ComposedRequest, error: &TransportError, elapsed: Duration);
}

/// Outcome of a call in non-throwing mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    /// Whether the call succeeded
    pub success: bool,
    /// HTTP status, or 500 when no response was received
    pub status: u16,
    /// Method of the request
    pub method: Method,
    /// Response body (`Null` when there is none)
    pub data: JsonValue,
}

impl RawResponse {
    /// Raw view of a successful response
    pub fn from_response(response: &TransportResponse) -> Self {
        Self {
            success: true,
            status: response.status,
            method: response.method,
            data: response.data.clone(),
        }
    }

    /// Raw view of a failed call
    pub fn from_error(request: &ComposedRequest, error: &TransportError) -> Self {
        match &error.response {
            Some(response) => Self {
                success: false,
                ..Self::from_response(response)
            },
            None => Self {
                success: false,
                status: FALLBACK_STATUS,
                method: request.method,
                data: JsonValue::Null,
            },
        }
    }
}
