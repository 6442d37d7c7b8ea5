//! Request builder
//!
//! [`compose_request`] is a pure function: the same pair of configs always
//! produces the same descriptor, independent of call order.

use super::config::{BaseRequestConfig, RequestConfig};
use super::fragments::{compose_url, url_fragments};
use crate::auth::{AuthConfig, BasicAuth};
use crate::serializer::Serializer;
use crate::types::{JsonObject, JsonValue, Method, ResponseType};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::warn;

const JSON_CONTENT_TYPE: &str = "application/json";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";
const URLENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const XML_CONTENT_TYPE: &str = "text/xml";

/// Body of a composed request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON value, encoded by the transport (strings are sent verbatim)
    Json(JsonValue),
    /// Already-encoded form body
    Encoded(String),
}

impl RequestBody {
    /// The exact text the transport puts on the wire
    pub fn to_text(&self) -> String {
        match self {
            RequestBody::Json(Value::String(s)) | RequestBody::Encoded(s) => s.clone(),
            RequestBody::Json(value) => value.to_string(),
        }
    }
}

/// Transport-ready descriptor for exactly one call
#[derive(Debug, Clone)]
pub struct ComposedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL without the query string
    pub url: String,
    /// Merged headers
    pub headers: HeaderMap,
    /// Basic credentials for the transport to attach
    pub auth: Option<BasicAuth>,
    /// Query params, encoded lazily through `serializer`
    pub params: Option<JsonObject>,
    /// Request body (never set for GET)
    pub body: Option<RequestBody>,
    /// Query string encoder
    pub serializer: Serializer,
    /// Timeout passed through to the transport
    pub timeout: Option<Duration>,
    /// How the transport should read the response body
    pub response_type: ResponseType,
}

impl ComposedRequest {
    /// Encoded query string, or `None` when there is nothing to send
    pub fn query_string(&self) -> Option<String> {
        let query = self.serializer.serialize(self.params.as_ref()?);
        (!query.is_empty()).then_some(query)
    }

    /// URL including the encoded query string
    pub fn full_url(&self) -> String {
        match self.query_string() {
            Some(query) => {
                let separator = if self.url.contains('?') { '&' } else { '?' };
                format!("{}{separator}{query}", self.url)
            }
            None => self.url.clone(),
        }
    }

    /// Body text as sent, if any
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(RequestBody::to_text)
    }

    /// Header value by (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Whether the body goes out as multipart form data
    pub fn is_multipart(&self) -> bool {
        self.header(CONTENT_TYPE.as_str())
            .is_some_and(|v| v.starts_with(MULTIPART_CONTENT_TYPE))
    }

    /// Insert or replace a header; invalid headers are skipped
    pub fn set_header(&mut self, name: &str, value: &str) {
        insert_header(&mut self.headers, name, value);
    }

    /// JSON description used for dry runs and debug output
    pub fn describe(&self) -> JsonValue {
        let headers: JsonObject = self
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    Value::String(value.to_str().unwrap_or_default().to_string()),
                )
            })
            .collect();

        json!({
            "method": self.method,
            "url": self.full_url(),
            "headers": headers,
            "auth": self.auth.as_ref().map(|a| a.username.clone()),
            "body": self.body_text(),
            "timeout_ms": self.timeout.map(|t| t.as_millis() as u64),
        })
    }
}

/// Merge a base config and a per-call config into one request
pub fn compose_request(base: &BaseRequestConfig, call: &RequestConfig) -> ComposedRequest {
    let method = call.method.unwrap_or_default();
    let serializer = Serializer::from_config(base.serializer.as_ref());

    let mut headers = merge_headers(base, call);
    if let Some(content_type) = content_type_override(call) {
        insert_header(&mut headers, CONTENT_TYPE.as_str(), content_type);
    }

    let auth = AuthConfig::resolve(&call.credentials, &base.credentials).apply(&mut headers);
    let url = compose_url(url_fragments(base, call));

    let body = match (&call.data, method) {
        (_, Method::GET) | (None, _) => None,
        (Some(data), _) if call.urlencoded => {
            Some(RequestBody::Encoded(serializer.serialize_value(data)))
        }
        (Some(data), _) => Some(RequestBody::Json(data.clone())),
    };

    ComposedRequest {
        method,
        url,
        headers,
        auth,
        // Params are never merged with the base config
        params: call.params.clone(),
        body,
        serializer,
        timeout: call
            .timeout_ms
            .or(base.timeout_ms)
            .map(Duration::from_millis),
        response_type: call.response_type.or(base.response_type).unwrap_or_default(),
    }
}

fn merge_headers(base: &BaseRequestConfig, call: &RequestConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    for (name, value) in base.headers.iter().chain(call.headers.iter()) {
        insert_header(&mut headers, name, value);
    }
    headers
}

fn content_type_override(call: &RequestConfig) -> Option<&'static str> {
    if call.multipart {
        Some(MULTIPART_CONTENT_TYPE)
    } else if call.urlencoded {
        Some(URLENCODED_CONTENT_TYPE)
    } else if call.xml {
        Some(XML_CONTENT_TYPE)
    } else {
        None
    }
}

pub(crate) fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => warn!("Skipping invalid header '{}'", name),
    }
}
