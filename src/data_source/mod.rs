//! REST data source
//!
//! A [`DataSource`] binds one [`BaseRequestConfig`](crate::request::BaseRequestConfig)
//! to a transport and exposes the usual resource operations on top of it:
//!
//! | operation     | method | path        |
//! |---------------|--------|-------------|
//! | `search`      | GET    | `base`      |
//! | `search_one`  | GET    | `base`      |
//! | `get`         | GET    | `base/id`   |
//! | `create`      | POST   | `base`      |
//! | `bulk_create` | POST   | `base/bulk` |
//! | `update`      | PUT    | `base/id`   |
//! | `bulk_update` | PUT    | `base/bulk` |
//! | `remove`      | DELETE | `base/id`   |
//!
//! Every call composes a fresh request, so one source can be shared across
//! tasks without locking.

mod operation;
mod source;

pub use operation::{Operation, BULK_PATH};
pub use source::DataSource;

#[cfg(test)]
mod tests;
