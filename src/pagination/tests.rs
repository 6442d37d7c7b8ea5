//! Tests for the pagination module

use super::*;
use crate::error::{Error, Result};
use crate::request::RequestConfig;
use crate::types::JsonObject;
use async_trait::async_trait;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Serves fixed pages and records every request's params
struct FakeSource {
    pages: Vec<Vec<u32>>,
    fail_on: Option<u64>,
    calls: Mutex<Vec<JsonObject>>,
}

impl FakeSource {
    fn new(pages: Vec<Vec<u32>>) -> Self {
        Self {
            pages,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, page: u64) -> Self {
        self.fail_on = Some(page);
        self
    }

    fn calls(&self) -> Vec<JsonObject> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource<u32> for FakeSource {
    async fn fetch_page(&self, call: RequestConfig) -> Result<PaginationResponse<u32>> {
        let params = call.params.unwrap_or_default();
        self.calls.lock().unwrap().push(params.clone());

        let page = params["page"].as_u64().unwrap();
        if self.fail_on == Some(page) {
            return Err(Error::transport("connection reset"));
        }

        let data = self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default();
        Ok(PaginationResponse {
            pagination: Pagination {
                total: self.pages.iter().map(Vec::len).sum::<usize>() as u64,
                current_page: page,
                last_page: self.pages.len() as u64,
                page_size: params["pageSize"].as_u64().unwrap(),
                ..Pagination::default()
            },
            data,
        })
    }
}

fn call(params: serde_json::Value) -> RequestConfig {
    RequestConfig::new().params(serde_json::from_value(params).unwrap())
}

// ============================================================================
// Type Tests
// ============================================================================

#[test]
fn test_pagination_deserialize_camel_case() {
    let response: PaginationResponse<u32> = serde_json::from_value(json!({
        "data": [1, 2],
        "pagination": {"total": 5, "currentPage": 1, "lastPage": 3, "from": 1, "to": 2, "pageSize": 2}
    }))
    .unwrap();

    assert_eq!(response.data, vec![1, 2]);
    assert_eq!(response.pagination.current_page, 1);
    assert_eq!(response.pagination.last_page, 3);
    assert_eq!(response.pagination.page_size, 2);
}

#[test]
fn test_pagination_missing_fields_default() {
    let response: PaginationResponse<u32> = serde_json::from_value(json!({})).unwrap();

    assert!(response.is_empty());
    assert_eq!(response.pagination, Pagination::default());
}

// ============================================================================
// Walker Tests
// ============================================================================

#[tokio::test]
async fn test_walker_yields_pages_then_stops() {
    let source = FakeSource::new(vec![vec![1, 2], vec![3]]);
    let mut walker = PageWalker::new(&source, call(json!({"pageSize": 2})));

    assert_eq!(walker.next_batch().await.unwrap(), Some(vec![1, 2]));
    assert_eq!(walker.next_batch().await.unwrap(), Some(vec![3]));
    assert_eq!(walker.next_batch().await.unwrap(), None);
    assert!(walker.is_done());

    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn test_walker_forwards_params() {
    let source = FakeSource::new(vec![vec![1], vec![2], vec![3]]);
    let mut walker = PageWalker::new(
        &source,
        call(json!({"page": 2, "pageSize": "5", "bulkSize": 1, "status": "open"})),
    );

    walker.next_page().await.unwrap();

    assert_eq!(
        serde_json::Value::Object(source.calls()[0].clone()),
        json!({"page": 2, "pageSize": 5, "status": "open"})
    );
}

#[tokio::test]
async fn test_walker_defaults() {
    let source = FakeSource::new(vec![vec![1]]);
    let mut walker = PageWalker::new(&source, RequestConfig::new());

    assert_eq!(walker.current_page(), 1);
    assert_eq!(walker.max_page(), None);

    walker.next_page().await.unwrap();
    assert_eq!(source.calls()[0]["pageSize"], json!(DEFAULT_PAGE_SIZE));
}

#[tokio::test]
async fn test_bulk_size_stops_and_calls_back() {
    let source = FakeSource::new(vec![vec![1], vec![2], vec![3]]);
    let seen = Arc::new(Mutex::new(None));
    let recorded = seen.clone();

    let mut walker = PageWalker::new(&source, call(json!({"bulkSize": 1}))).on_complete(
        move |page| async move {
            *recorded.lock().unwrap() = Some(page);
            Ok(())
        },
    );

    assert_eq!(walker.next_batch().await.unwrap(), Some(vec![1]));
    assert_eq!(*seen.lock().unwrap(), None);

    assert_eq!(walker.next_batch().await.unwrap(), None);
    assert_eq!(*seen.lock().unwrap(), Some(2));
    assert_eq!(walker.next_batch().await.unwrap(), None);

    assert_eq!(source.calls().len(), 1);
}

#[tokio::test]
async fn test_cap_from_later_start_page() {
    let source = FakeSource::new(vec![vec![1], vec![2], vec![3], vec![4]]);
    let seen = Arc::new(Mutex::new(None));
    let recorded = seen.clone();

    let walker = PageWalker::new(&source, RequestConfig::new())
        .page(2)
        .bulk_size(2)
        .on_complete(move |page| async move {
            *recorded.lock().unwrap() = Some(page);
            Ok(())
        });

    assert_eq!(walker.max_page(), Some(3));
    assert_eq!(walker.collect_all().await.unwrap(), vec![2, 3]);
    assert_eq!(*seen.lock().unwrap(), Some(4));
}

#[tokio::test]
async fn test_huge_bulk_size_saturates_cap() {
    let source = FakeSource::new(vec![vec![1], vec![2], vec![3]]);
    let mut walker = PageWalker::new(&source, call(json!({"page": 2, "bulkSize": u64::MAX})));

    assert_eq!(walker.max_page(), Some(u64::MAX));
    assert_eq!(walker.next_batch().await.unwrap(), Some(vec![2]));
    assert_eq!(walker.next_batch().await.unwrap(), Some(vec![3]));
    assert_eq!(walker.next_batch().await.unwrap(), None);
}

#[tokio::test]
async fn test_no_callback_when_cap_is_last_page() {
    let source = FakeSource::new(vec![vec![1], vec![2]]);
    let seen = Arc::new(Mutex::new(None));
    let recorded = seen.clone();

    let walker = PageWalker::new(&source, call(json!({"bulkSize": 2}))).on_complete(
        move |page| async move {
            *recorded.lock().unwrap() = Some(page);
            Ok(())
        },
    );

    assert_eq!(walker.collect_all().await.unwrap(), vec![1, 2]);
    assert_eq!(*seen.lock().unwrap(), None);
}

#[tokio::test]
async fn test_empty_page_ends_without_callback() {
    let source = FakeSource::new(vec![]);
    let seen = Arc::new(Mutex::new(None));
    let recorded = seen.clone();

    let mut walker = PageWalker::new(&source, call(json!({"bulkSize": 1}))).on_complete(
        move |page| async move {
            *recorded.lock().unwrap() = Some(page);
            Ok(())
        },
    );

    assert_eq!(walker.next_page().await.unwrap(), None);
    assert!(walker.is_done());
    assert_eq!(*seen.lock().unwrap(), None);
}

#[tokio::test]
async fn test_fetch_error_ends_walk() {
    let source = FakeSource::new(vec![vec![1], vec![2], vec![3]]).failing_on(2);
    let mut walker = PageWalker::new(&source, RequestConfig::new());

    assert_eq!(walker.next_batch().await.unwrap(), Some(vec![1]));
    assert!(matches!(
        walker.next_batch().await,
        Err(Error::Transport { .. })
    ));
    assert_eq!(walker.next_batch().await.unwrap(), None);
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn test_callback_error_is_returned() {
    let source = FakeSource::new(vec![vec![1], vec![2]]);
    let mut walker = PageWalker::new(&source, RequestConfig::new())
        .bulk_size(1)
        .on_complete(|_| async { Err(Error::Other("queue full".to_string())) });

    walker.next_page().await.unwrap();
    assert!(matches!(walker.next_page().await, Err(Error::Other(_))));
    assert!(walker.is_done());
}

// ============================================================================
// Stream Tests
// ============================================================================

#[tokio::test]
async fn test_page_stream() {
    let source = FakeSource::new(vec![vec![1, 2], vec![3]]);
    let pages: Vec<PaginationResponse<u32>> = PageWalker::new(&source, call(json!({"pageSize": 2})))
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].pagination.current_page, 2);
}

#[tokio::test]
async fn test_batch_and_item_streams() {
    let source = FakeSource::new(vec![vec![1, 2], vec![3]]);

    let batches: Vec<Vec<u32>> = PageWalker::new(&source, RequestConfig::new())
        .into_batch_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(batches, vec![vec![1, 2], vec![3]]);

    let items: Vec<u32> = PageWalker::new(&source, RequestConfig::new())
        .into_item_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}
