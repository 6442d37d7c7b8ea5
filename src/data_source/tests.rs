//! Tests for the data source module

use super::*;
use crate::error::Error;
use crate::http::{Transport, TransportError, TransportResponse};
use crate::logger::{RawResponse, RequestLogger};
use crate::request::{BaseRequestConfig, ComposedRequest, RequestConfig};
use crate::signer::{verify_signature, HmacSigner, SignerConfig};
use crate::types::Method;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_case::test_case;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
}

type Reply = std::result::Result<TransportResponse, TransportError>;

/// Replays queued replies and records every request it receives
#[derive(Default)]
struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ComposedRequest>>,
}

impl MockTransport {
    fn reply(self, status: u16, data: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(response(status, data)));
        self
    }

    fn fail(self, error: TransportError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    fn requests(&self) -> Vec<ComposedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> ComposedRequest {
        self.requests().pop().expect("no request sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn dispatch(&self, request: &ComposedRequest) -> Reply {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(response(200, Value::Null)))
    }
}

#[derive(Debug, Default)]
struct RecordingLogger {
    events: Mutex<Vec<String>>,
}

impl RequestLogger for RecordingLogger {
    fn log_request(&self, request: &ComposedRequest) {
        self.events
            .lock()
            .unwrap()
            .push(format!("request {}", request.method));
    }

    fn log_response(&self, response: &TransportResponse, _elapsed: Duration) {
        self.events
            .lock()
            .unwrap()
            .push(format!("response {}", response.status));
    }

    fn log_error(&self, _request: &ComposedRequest, error: &TransportError, _elapsed: Duration) {
        self.events
            .lock()
            .unwrap()
            .push(format!("error {}", error.message));
    }
}

fn response(status: u16, data: Value) -> TransportResponse {
    TransportResponse {
        status,
        status_text: String::new(),
        method: Method::GET,
        url: "https://api.example.com/users".to_string(),
        data,
    }
}

fn base() -> BaseRequestConfig {
    BaseRequestConfig::builder()
        .base_url("https://api.example.com")
        .url("users")
        .build()
}

fn source(transport: &Arc<MockTransport>) -> DataSource<User> {
    DataSource::with_transport(base(), transport.clone())
}

fn ada() -> Value {
    json!({"id": 1, "name": "Ada"})
}

// ============================================================================
// Operation Tests
// ============================================================================

#[test_case(Operation::Search, Method::GET ; "search")]
#[test_case(Operation::SearchOne, Method::GET ; "search one")]
#[test_case(Operation::Get("1".into()), Method::GET ; "get")]
#[test_case(Operation::Create, Method::POST ; "create")]
#[test_case(Operation::BulkCreate, Method::POST ; "bulk create")]
#[test_case(Operation::Update("1".into()), Method::PUT ; "update")]
#[test_case(Operation::BulkUpdate, Method::PUT ; "bulk update")]
#[test_case(Operation::Remove("1".into()), Method::DELETE ; "remove")]
fn test_operation_method(operation: Operation, expected: Method) {
    assert_eq!(operation.method(), expected);
    assert_eq!(operation.apply(RequestConfig::new()).method, Some(expected));
}

#[test]
fn test_operation_overrides_caller_method() {
    let call = Operation::Search.apply(RequestConfig::new().method(Method::DELETE));
    assert_eq!(call.method, Some(Method::GET));
}

#[test]
fn test_search_one_params_overlay() {
    let call = Operation::SearchOne.apply(RequestConfig::new().param("pageSize", 5).param("q", "x"));

    assert_eq!(
        Value::Object(call.params.unwrap()),
        json!({"pageSize": 5, "extended": true, "strict": true, "q": "x"})
    );
}

#[test]
fn test_bulk_wraps_items() {
    let call = Operation::BulkUpdate.apply(RequestConfig::new().data(json!([1, 2])));

    assert_eq!(call.url.as_deref(), Some(BULK_PATH));
    assert_eq!(call.data, Some(json!({"bulk": [1, 2]})));

    let call = Operation::BulkCreate.apply(RequestConfig::new());
    assert_eq!(call.data, Some(json!({"bulk": []})));
}

// ============================================================================
// Resource Operation Tests
// ============================================================================

#[tokio::test]
async fn test_search() {
    let transport = Arc::new(MockTransport::default().reply(
        200,
        json!({
            "data": [ada()],
            "pagination": {"total": 1, "currentPage": 1, "lastPage": 1, "from": 1, "to": 1, "pageSize": 30}
        }),
    ));

    let page = source(&transport)
        .search(RequestConfig::new().param("q", "ada"))
        .await
        .unwrap();

    assert_eq!(page.data[0].name, "Ada");
    assert_eq!(page.pagination.total, 1);

    let request = transport.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.full_url(), "https://api.example.com/users?q=ada");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_search_one() {
    let transport = Arc::new(
        MockTransport::default()
            .reply(200, json!({"data": [ada(), {"id": 2, "name": "Bob"}]}))
            .reply(200, json!({"data": []})),
    );
    let source = source(&transport);

    let found = source.search_one(RequestConfig::new()).await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(1));
    assert_eq!(
        transport.last().full_url(),
        "https://api.example.com/users?extended=true&pageSize=1&strict=true"
    );

    let missing = source.search_one(RequestConfig::new()).await.unwrap();
    assert_eq!(missing, None);
}

#[tokio::test]
async fn test_get() {
    let transport = Arc::new(MockTransport::default().reply(200, ada()));

    let user = source(&transport)
        .get(1, RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(user, User { id: 1, name: "Ada".to_string() });
    assert_eq!(transport.last().url, "https://api.example.com/users/1");
}

#[tokio::test]
async fn test_create() {
    let transport = Arc::new(MockTransport::default().reply(201, ada()));

    source(&transport)
        .create(&json!({"name": "Ada"}), RequestConfig::new())
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, "https://api.example.com/users");
    assert_eq!(request.body_text().as_deref(), Some(r#"{"name":"Ada"}"#));
}

#[tokio::test]
async fn test_bulk_create() {
    let transport = Arc::new(MockTransport::default().reply(201, json!([ada()])));
    let items = vec![json!({"name": "Ada"})];

    let users = source(&transport)
        .bulk_create(&items, RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    let request = transport.last();
    assert_eq!(request.url, "https://api.example.com/users/bulk");
    assert_eq!(
        request.body_text().as_deref(),
        Some(r#"{"bulk":[{"name":"Ada"}]}"#)
    );
}

#[tokio::test]
async fn test_update_and_bulk_update() {
    let transport = Arc::new(
        MockTransport::default()
            .reply(200, ada())
            .reply(200, json!([ada()])),
    );
    let source = source(&transport);

    source
        .update("1", &json!({"name": "Ada"}), RequestConfig::new())
        .await
        .unwrap();
    source
        .bulk_update(&[json!({"id": 1})], RequestConfig::new())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].url, "https://api.example.com/users/1");
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(requests[1].url, "https://api.example.com/users/bulk");
}

#[tokio::test]
async fn test_remove_ignores_body() {
    let transport = Arc::new(MockTransport::default().reply(204, Value::Null));

    source(&transport)
        .remove(7, RequestConfig::new())
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, "https://api.example.com/users/7");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_bulk_search_walks_pages() {
    let transport = Arc::new(
        MockTransport::default()
            .reply(200, json!({"data": [ada()], "pagination": {"currentPage": 1, "lastPage": 2}}))
            .reply(
                200,
                json!({"data": [{"id": 2, "name": "Bob"}], "pagination": {"currentPage": 2, "lastPage": 2}}),
            ),
    );
    let source = source(&transport);

    let users = source
        .bulk_search(RequestConfig::new().param("pageSize", 1))
        .collect_all()
        .await
        .unwrap();

    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    let urls: Vec<String> = transport.requests().iter().map(ComposedRequest::full_url).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.example.com/users?page=1&pageSize=1",
            "https://api.example.com/users?page=2&pageSize=1",
        ]
    );
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_error_with_body() {
    let transport = Arc::new(MockTransport::default().fail(TransportError::with_response(
        "failed",
        response(422, json!({"error": "invalid"})),
    )));

    let err = source(&transport)
        .get(1, RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.body(), Some(&json!({"error": "invalid"})));
}

#[tokio::test]
async fn test_error_without_body() {
    let transport = Arc::new(
        MockTransport::default()
            .fail(TransportError::with_response("failed", response(503, Value::Null))),
    );

    let err = source(&transport)
        .get(1, RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Response { status: 503, .. }));
}

#[tokio::test]
async fn test_error_without_response() {
    let transport = Arc::new(MockTransport::default().fail(TransportError::new("timed out")));

    let err = source(&transport)
        .get(1, RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { ref message } if message == "timed out"));
}

#[tokio::test]
async fn test_decode_error() {
    let transport = Arc::new(MockTransport::default().reply(200, json!({"unexpected": true})));

    let err = source(&transport)
        .get(1, RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Raw Mode Tests
// ============================================================================

#[tokio::test]
async fn test_raw_success() {
    let transport = Arc::new(MockTransport::default().reply(200, ada()));

    let raw = source(&transport)
        .execute_raw(&Operation::Get("1".into()), RequestConfig::new())
        .await;

    assert_eq!(
        raw,
        RawResponse {
            success: true,
            status: 200,
            method: Method::GET,
            data: ada(),
        }
    );
}

#[tokio::test]
async fn test_raw_failure_without_response() {
    let transport = Arc::new(MockTransport::default().fail(TransportError::new("refused")));

    let raw = source(&transport)
        .execute_raw(&Operation::Remove("1".into()), RequestConfig::new())
        .await;

    assert!(!raw.success);
    assert_eq!(raw.status, 500);
    assert_eq!(raw.method, Method::DELETE);
}

// ============================================================================
// Logging and Signing Tests
// ============================================================================

#[tokio::test]
async fn test_logger_sees_request_and_outcome() {
    let transport = Arc::new(
        MockTransport::default()
            .reply(200, ada())
            .fail(TransportError::new("refused")),
    );
    let logger = Arc::new(RecordingLogger::default());
    let source = source(&transport).with_logger(logger.clone());

    source.get(1, RequestConfig::new()).await.unwrap();
    source.get(2, RequestConfig::new()).await.unwrap_err();

    assert_eq!(
        *logger.events.lock().unwrap(),
        vec![
            "request GET".to_string(),
            "response 200".to_string(),
            "request GET".to_string(),
            "error refused".to_string(),
        ]
    );
}

#[test]
fn test_logger_from_config() {
    let transport: Arc<MockTransport> = Arc::default();
    let config = BaseRequestConfig::builder().logger(true).name("users").build();

    let source: DataSource = DataSource::with_transport(config, transport.clone());
    assert!(format!("{source:?}").contains("TracingLogger"));

    let source: DataSource = DataSource::with_transport(base(), transport);
    assert!(format!("{source:?}").contains("logger: None"));
}

#[tokio::test]
async fn test_signature_covers_body() {
    let transport = Arc::new(MockTransport::default().reply(201, ada()));
    let config = BaseRequestConfig::builder()
        .base_url("https://api.example.com")
        .signing_secret("whsec_test")
        .build();
    let source: DataSource<User> = DataSource::with_transport(config, transport.clone());

    source
        .create(&json!({"name": "Ada"}), RequestConfig::new())
        .await
        .unwrap();

    let request = transport.last();
    let signature = request.header("x-signature").expect("signature header");
    assert!(verify_signature(signature, r#"{"name":"Ada"}"#, "whsec_test"));
}

#[tokio::test]
async fn test_signature_over_empty_body() {
    let transport = Arc::new(MockTransport::default().reply(200, ada()));
    let signer = HmacSigner::new(SignerConfig::new("s3cret").with_header("X-Sig"));
    let source = source(&transport).with_signer(Arc::new(signer));

    source.get(1, RequestConfig::new()).await.unwrap();

    let request = transport.last();
    assert!(verify_signature(request.header("x-sig").unwrap(), "", "s3cret"));
}

#[test]
fn test_empty_secret_disables_signer() {
    let transport: Arc<MockTransport> = Arc::default();
    let config = BaseRequestConfig::builder()
        .base_url("https://api.example.com")
        .signing_secret("")
        .build();
    let source: DataSource = DataSource::with_transport(config, transport);

    let request = source.compose(&RequestConfig::new()).unwrap();
    assert!(request.header("x-signature").is_none());
}
