//! Base and per-call request configuration

use crate::auth::{BasicAuth, Credentials};
use crate::serializer::{ArrayFormat, SerializerConfig};
use crate::signer::SignerConfig;
use crate::types::{JsonObject, JsonValue, LogLevel, Method, ResponseType, StringMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ============================================================================
// Base Config
// ============================================================================

/// Configuration shared by every call made through one data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseRequestConfig {
    /// Root URL of the API (e.g. `https://api.example.com`)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Named root URLs, selected with `base_url_name`
    #[serde(default)]
    pub base_url_map: Option<HashMap<String, String>>,

    /// Key into `base_url_map`
    #[serde(default)]
    pub base_url_name: Option<String>,

    /// Resource path appended to the root URL
    #[serde(default)]
    pub url: Option<String>,

    /// Extra path fragments appended after `url`
    #[serde(default)]
    pub url_parts: Vec<String>,

    /// Default headers
    #[serde(default)]
    pub headers: StringMap,

    /// Default credentials
    #[serde(flatten)]
    pub credentials: Credentials,

    /// Query string serializer settings
    #[serde(default)]
    pub serializer: Option<SerializerConfig>,

    /// Dump full transport errors at debug level
    #[serde(default)]
    pub debug: bool,

    /// Log every request, response and failure
    #[serde(default)]
    pub logger: bool,

    /// Name attached to log lines
    #[serde(default)]
    pub name: Option<String>,

    /// Level controlling whether response bodies are logged
    #[serde(default)]
    pub log_level: LogLevel,

    /// Request timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// How response bodies are read
    #[serde(default)]
    pub response_type: Option<ResponseType>,

    /// Outgoing request signing
    #[serde(default)]
    pub signer: Option<SignerConfig>,
}

impl BaseRequestConfig {
    /// Create a new config builder
    pub fn builder() -> BaseRequestConfigBuilder {
        BaseRequestConfigBuilder::default()
    }

    /// Configured timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Builder for [`BaseRequestConfig`]
#[derive(Debug, Default)]
pub struct BaseRequestConfigBuilder {
    config: BaseRequestConfig,
}

impl BaseRequestConfigBuilder {
    /// Set the root URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Register a named root URL
    pub fn named_base_url(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.config
            .base_url_map
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), url.into());
        self
    }

    /// Select a named root URL
    pub fn base_url_name(mut self, name: impl Into<String>) -> Self {
        self.config.base_url_name = Some(name.into());
        self
    }

    /// Set the resource path
    pub fn url(mut self, url: impl ToString) -> Self {
        self.config.url = Some(url.to_string());
        self
    }

    /// Append a path fragment
    pub fn url_part(mut self, part: impl ToString) -> Self {
        self.config.url_parts.push(part.to_string());
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set basic credentials
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials.auth = Some(BasicAuth::new(username, password));
        self
    }

    /// Set a bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.credentials.bearer_token = Some(token.into());
        self
    }

    /// Set an API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.credentials.api_key = Some(key.into());
        self
    }

    /// Set the array format for query strings
    pub fn array_format(mut self, format: ArrayFormat) -> Self {
        self.config.serializer = Some(SerializerConfig {
            array: Some(format),
        });
        self
    }

    /// Enable debug output
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Enable request logging
    pub fn logger(mut self, enabled: bool) -> Self {
        self.config.logger = enabled;
        self
    }

    /// Set the logger name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Set the response type
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.config.response_type = Some(response_type);
        self
    }

    /// Sign outgoing requests with this secret
    pub fn signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.signer = Some(SignerConfig::new(secret));
        self
    }

    /// Build the config
    pub fn build(self) -> BaseRequestConfig {
        self.config
    }
}

// ============================================================================
// Per-Call Config
// ============================================================================

/// Overrides supplied for a single call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// HTTP method (GET when unset)
    #[serde(default)]
    pub method: Option<Method>,

    /// Root URL override
    #[serde(default)]
    pub base_url: Option<String>,

    /// Named root URLs override
    #[serde(default)]
    pub base_url_map: Option<HashMap<String, String>>,

    /// Named root URL selection override
    #[serde(default)]
    pub base_url_name: Option<String>,

    /// Path appended after the base fragments
    #[serde(default)]
    pub url: Option<String>,

    /// Extra path fragments appended after `url`
    #[serde(default)]
    pub url_parts: Vec<String>,

    /// Headers for this call
    #[serde(default)]
    pub headers: StringMap,

    /// Credentials for this call
    #[serde(flatten)]
    pub credentials: Credentials,

    /// Query params
    #[serde(default)]
    pub params: Option<JsonObject>,

    /// Request body
    #[serde(default)]
    pub data: Option<JsonValue>,

    /// Send the body as `application/x-www-form-urlencoded`
    #[serde(default)]
    pub urlencoded: bool,

    /// Send the body as `multipart/form-data`
    #[serde(default)]
    pub multipart: bool,

    /// Send the body as `text/xml`
    #[serde(default)]
    pub xml: bool,

    /// Timeout override in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Response type override
    #[serde(default)]
    pub response_type: Option<ResponseType>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Override the root URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Select a named root URL
    #[must_use]
    pub fn base_url_name(mut self, name: impl Into<String>) -> Self {
        self.base_url_name = Some(name.into());
        self
    }

    /// Set the path
    #[must_use]
    pub fn url(mut self, url: impl ToString) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Append a path fragment
    #[must_use]
    pub fn url_part(mut self, part: impl ToString) -> Self {
        self.url_parts.push(part.to_string());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set basic credentials
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials.auth = Some(BasicAuth::new(username, password));
        self
    }

    /// Set a bearer token
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.bearer_token = Some(token.into());
        self
    }

    /// Set an API key
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credentials.api_key = Some(key.into());
        self
    }

    /// Add a query param
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.params
            .get_or_insert_with(JsonObject::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace all query params
    #[must_use]
    pub fn params(mut self, params: JsonObject) -> Self {
        self.params = Some(params);
        self
    }

    /// Set the body
    #[must_use]
    pub fn data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    /// Form-encode the body
    #[must_use]
    pub fn urlencoded(mut self) -> Self {
        self.urlencoded = true;
        self
    }

    /// Send the body as multipart form data
    #[must_use]
    pub fn multipart(mut self) -> Self {
        self.multipart = true;
        self
    }

    /// Mark the body as XML
    #[must_use]
    pub fn xml(mut self) -> Self {
        self.xml = true;
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Set the response type
    #[must_use]
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }
}
