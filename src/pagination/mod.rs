//! Pagination module
//!
//! Page-numbered listing endpoints answer with a [`PaginationResponse`]:
//!
//! ```json
//! {
//!   "data": [{ "id": 1 }, { "id": 2 }],
//!   "pagination": { "total": 3, "currentPage": 1, "lastPage": 2, "from": 1, "to": 2, "pageSize": 2 }
//! }
//! ```
//!
//! [`PageWalker`] requests pages one after another until the server reports
//! the last page, a page comes back empty, or an optional page cap
//! (`bulkSize`) is hit. Walking is lazy and strictly sequential; a walker
//! cannot be restarted.

mod types;
mod walker;

pub use types::{PageSource, Pagination, PaginationResponse};
pub use walker::{CompletionCallback, PageWalker, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
