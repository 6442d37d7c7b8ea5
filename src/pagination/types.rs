//! Pagination types and traits

use crate::error::Result;
use crate::request::RequestConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Pagination block returned next to a page of data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// Total number of items
    pub total: u64,
    /// Page this response holds
    pub current_page: u64,
    /// Last available page
    pub last_page: u64,
    /// Index of the first item on this page
    pub from: u64,
    /// Index of the last item on this page
    pub to: u64,
    /// Items per page
    pub page_size: u64,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResponse<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Position of this page
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> PaginationResponse<T> {
    /// Whether the page holds no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Something that can fetch a single page
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    /// Fetch the page described by the params of `call`
    async fn fetch_page(&self, call: RequestConfig) -> Result<PaginationResponse<T>>;
}
