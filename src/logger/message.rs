//! Log line assembly

use crate::types::{JsonValue, Method};
use serde_json::Value;
use std::time::Duration;

/// Builds a space-separated log line piece by piece.
///
/// Empty pieces are skipped, so callers can feed optional values straight in.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    parts: Vec<String>,
}

impl MessageBuilder {
    /// Start an empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.parts.push(method.to_string());
        self
    }

    /// Append the URL
    #[must_use]
    pub fn url(self, url: &str) -> Self {
        self.text(url)
    }

    /// Append a request body as sent
    #[must_use]
    pub fn body(self, body: Option<&str>) -> Self {
        self.text(body.unwrap_or_default())
    }

    /// Append a decoded body. Strings go in verbatim, empty containers are skipped.
    #[must_use]
    pub fn data(self, data: &JsonValue) -> Self {
        match data {
            Value::Null => self,
            Value::String(s) => self.text(s),
            Value::Object(map) if map.is_empty() => self,
            Value::Array(items) if items.is_empty() => self,
            other => self.text(&other.to_string()),
        }
    }

    /// Append status code and reason phrase
    #[must_use]
    pub fn status(mut self, status: u16, status_text: &str) -> Self {
        self.parts.push(status.to_string());
        self.text(status_text)
    }

    /// Append the elapsed time
    #[must_use]
    pub fn duration(mut self, elapsed: Duration) -> Self {
        self.parts.push(format!("({}ms)", elapsed.as_millis()));
        self
    }

    /// Append free text
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.parts.push(text.to_string());
        }
        self
    }

    /// Join the pieces
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}
