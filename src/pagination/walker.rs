//! Sequential page walker

use super::types::{PageSource, PaginationResponse};
use crate::error::{Error, Result};
use crate::request::RequestConfig;
use crate::types::{JsonObject, JsonValue};
use futures::future::BoxFuture;
use futures::stream::{self, Stream, TryStreamExt};
use std::fmt;
use std::future::Future;
use tracing::debug;

/// Page size used when the caller does not pass one
pub const DEFAULT_PAGE_SIZE: u64 = 30;

const PAGE_PARAM: &str = "page";
const PAGE_SIZE_PARAM: &str = "pageSize";
const BULK_SIZE_PARAM: &str = "bulkSize";

/// Called with the next page number when the walk stops at the page cap
pub type CompletionCallback<'a> = Box<dyn FnOnce(u64) -> BoxFuture<'a, Result<()>> + Send + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Fetching,
    Completing { next_page: u64 },
    Done,
}

/// Lazily walks the pages of a search.
///
/// `page`, `pageSize` and `bulkSize` are taken out of the caller's params;
/// the remaining params go out with every page request.
pub struct PageWalker<'a, T> {
    source: &'a (dyn PageSource<T> + 'a),
    call: RequestConfig,
    start_page: u64,
    page: u64,
    page_size: u64,
    bulk_size: Option<u64>,
    state: WalkState,
    on_complete: Option<CompletionCallback<'a>>,
}

impl<'a, T: Send> PageWalker<'a, T> {
    /// Create a walker over `source`
    pub fn new<S>(source: &'a S, mut call: RequestConfig) -> Self
    where
        S: PageSource<T> + 'a,
    {
        let mut params = call.params.take().unwrap_or_default();
        let page = take_count(&mut params, PAGE_PARAM).unwrap_or(1);
        let page_size = take_count(&mut params, PAGE_SIZE_PARAM).unwrap_or(DEFAULT_PAGE_SIZE);
        let bulk_size = take_count(&mut params, BULK_SIZE_PARAM);
        call.params = Some(params);

        Self {
            source,
            call,
            start_page: page,
            page,
            page_size,
            bulk_size,
            state: WalkState::Fetching,
            on_complete: None,
        }
    }

    /// Start at a different page
    #[must_use]
    pub fn page(mut self, page: u64) -> Self {
        let page = page.max(1);
        self.start_page = page;
        self.page = page;
        self
    }

    /// Request a different page size
    #[must_use]
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }

    /// Stop after this many pages (0 removes the cap)
    #[must_use]
    pub fn bulk_size(mut self, bulk_size: u64) -> Self {
        self.bulk_size = (bulk_size > 0).then_some(bulk_size);
        self
    }

    /// Run `callback` with the next page number when the walk stops at the cap
    #[must_use]
    pub fn on_complete<F, Fut>(mut self, callback: F) -> Self
    where
        F: FnOnce(u64) -> Fut + Send + 'a,
        Fut: Future<Output = Result<()>> + Send + 'a,
    {
        self.on_complete = Some(Box::new(move |page| Box::pin(callback(page))));
        self
    }

    /// Page the next fetch will request
    pub fn current_page(&self) -> u64 {
        self.page
    }

    /// Last page allowed by the cap
    pub fn max_page(&self) -> Option<u64> {
        self.bulk_size
            .map(|size| self.start_page.saturating_add(size.saturating_sub(1)))
    }

    /// Whether the walk has ended
    pub fn is_done(&self) -> bool {
        self.state == WalkState::Done
    }

    /// Fetch the next page, or `None` when the walk is over.
    ///
    /// A fetch error is returned once and ends the walk.
    pub async fn next_page(&mut self) -> Result<Option<PaginationResponse<T>>> {
        match self.state {
            WalkState::Done => return Ok(None),
            WalkState::Completing { next_page } => {
                self.state = WalkState::Done;
                if let Some(callback) = self.on_complete.take() {
                    debug!("Page cap reached, next page is {}", next_page);
                    callback(next_page).await?;
                }
                return Ok(None);
            }
            WalkState::Fetching => {}
        }

        let response = match self.source.fetch_page(self.page_call()).await {
            Ok(response) => response,
            Err(e) => {
                self.state = WalkState::Done;
                return Err(e);
            }
        };

        if response.is_empty() {
            self.state = WalkState::Done;
            return Ok(None);
        }

        self.page = self.page.saturating_add(1);

        let current = response.pagination.current_page;
        if current == response.pagination.last_page {
            self.state = WalkState::Done;
        } else if Some(current) == self.max_page() {
            self.state = WalkState::Completing {
                next_page: self.page,
            };
        }

        Ok(Some(response))
    }

    /// Fetch the items of the next page
    pub async fn next_batch(&mut self) -> Result<Option<Vec<T>>> {
        Ok(self.next_page().await?.map(|page| page.data))
    }

    /// Stream of whole pages
    pub fn into_stream(self) -> impl Stream<Item = Result<PaginationResponse<T>>> + 'a
    where
        T: 'a,
    {
        stream::try_unfold(self, |mut walker| async move {
            let page = walker.next_page().await?;
            Ok::<_, Error>(page.map(|page| (page, walker)))
        })
    }

    /// Stream of batches, one per page
    pub fn into_batch_stream(self) -> impl Stream<Item = Result<Vec<T>>> + 'a
    where
        T: 'a,
    {
        self.into_stream().map_ok(|page| page.data)
    }

    /// Stream of individual items across all pages
    pub fn into_item_stream(self) -> impl Stream<Item = Result<T>> + 'a
    where
        T: 'a,
    {
        self.into_stream()
            .map_ok(|page| stream::iter(page.data.into_iter().map(Ok)))
            .try_flatten()
    }

    /// Collect every item across all pages
    pub async fn collect_all(self) -> Result<Vec<T>>
    where
        T: 'a,
    {
        self.into_item_stream().try_collect().await
    }

    fn page_call(&self) -> RequestConfig {
        let mut params = self.call.params.clone().unwrap_or_default();
        params.insert(PAGE_PARAM.to_string(), self.page.into());
        params.insert(PAGE_SIZE_PARAM.to_string(), self.page_size.into());
        self.call.clone().params(params)
    }
}

impl<T> fmt::Debug for PageWalker<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageWalker")
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("bulk_size", &self.bulk_size)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Remove a positive count from `params`, accepting numbers or numeric strings
fn take_count(params: &mut JsonObject, key: &str) -> Option<u64> {
    let count = match params.remove(key)? {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    count.filter(|&n| n > 0)
}
