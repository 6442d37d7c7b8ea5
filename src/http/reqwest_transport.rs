//! reqwest-backed transport

use super::transport::{Transport, TransportError, TransportResponse};
use crate::error::{Error, Result};
use crate::request::{ComposedRequest, RequestBody};
use crate::types::{JsonValue, ResponseType};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Transport that sends requests with reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with its own client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("solidafy-request/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client))
    }

    /// Create a transport around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(
        &self,
        request: &ComposedRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let url = request.full_url();
        let parsed = Url::parse(&url)
            .map_err(|e| TransportError::new(format!("Invalid URL '{url}': {e}")))?;
        let mut headers = request.headers.clone();

        if let Some(auth) = &request.auth {
            match HeaderValue::from_str(&auth.header_value()) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Skipping basic auth with invalid characters"),
            }
        }

        let multipart = match &request.body {
            Some(RequestBody::Json(Value::Object(fields))) if request.is_multipart() => {
                // reqwest writes its own content type with the boundary
                headers.remove(CONTENT_TYPE);
                let form = fields.iter().fold(Form::new(), |form, (key, value)| {
                    form.text(key.clone(), field_text(value))
                });
                Some(form)
            }
            _ => None,
        };

        let mut builder = self
            .client
            .request(request.method.into(), parsed)
            .headers(headers);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match (multipart, &request.body) {
            (Some(form), _) => builder.multipart(form),
            (None, Some(body)) => builder.body(body.to_text()),
            (None, None) => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response body: {e}")))?;

        let response = TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            method: request.method,
            url,
            data: decode_body(text, request.response_type),
        };

        if status.is_success() {
            debug!("Request succeeded: {} {}", response.method, response.url);
            Ok(response)
        } else {
            Err(TransportError::with_response(
                format!("Request failed with status code {}", status.as_u16()),
                response,
            ))
        }
    }
}

fn field_text(value: &JsonValue) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn decode_body(text: String, response_type: ResponseType) -> JsonValue {
    if text.is_empty() {
        return Value::Null;
    }
    match response_type {
        ResponseType::Text => Value::String(text),
        ResponseType::Json => serde_json::from_str(&text).unwrap_or(Value::String(text)),
    }
}
