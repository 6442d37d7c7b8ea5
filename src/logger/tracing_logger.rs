//! `tracing`-backed request logger

use super::message::MessageBuilder;
use super::types::RequestLogger;
use crate::http::{TransportError, TransportResponse};
use crate::request::ComposedRequest;
use crate::types::LogLevel;
use std::time::Duration;
use tracing::{debug, error, info};

/// Logger writing requests at debug, responses at info and failures at error.
///
/// Response bodies are only included when `level` is trace or debug.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    name: String,
    level: LogLevel,
}

impl TracingLogger {
    /// Create a logger
    pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Logger name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured level
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Line written before dispatch
    pub fn request_message(&self, request: &ComposedRequest) -> String {
        MessageBuilder::new()
            .method(request.method)
            .url(&request.full_url())
            .body(request.body_text().as_deref())
            .build()
    }

    /// Line written after a successful response
    pub fn response_message(&self, response: &TransportResponse, elapsed: Duration) -> String {
        let mut message = MessageBuilder::new()
            .method(response.method)
            .url(&response.url)
            .status(response.status, &response.status_text);
        if self.level.is_verbose() {
            message = message.data(&response.data);
        }
        message.duration(elapsed).build()
    }

    /// Line written after a failure
    pub fn error_message(
        &self,
        request: &ComposedRequest,
        error: &TransportError,
        elapsed: Duration,
    ) -> String {
        let mut message = MessageBuilder::new()
            .method(request.method)
            .url(&request.full_url())
            .body(request.body_text().as_deref());

        message = match &error.response {
            Some(response) => {
                let message = message.status(response.status, &response.status_text);
                if self.level.is_verbose() {
                    message.data(&response.data)
                } else {
                    message
                }
            }
            None => message.text(&error.message),
        };

        message.duration(elapsed).build()
    }
}

impl RequestLogger for TracingLogger {
    fn log_request(&self, request: &ComposedRequest) {
        debug!(logger = %self.name, "{}", self.request_message(request));
    }

    fn log_response(&self, response: &TransportResponse, elapsed: Duration) {
        info!(logger = %self.name, "{}", self.response_message(response, elapsed));
    }

    fn log_error(&self, request: &ComposedRequest, error: &TransportError, elapsed: Duration) {
        error!(logger = %self.name, "{}", self.error_message(request, error, elapsed));
    }
}
