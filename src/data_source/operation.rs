//! Resource operations and their per-call configs

use crate::request::RequestConfig;
use crate::types::{JsonObject, Method};
use serde_json::{json, Value};

/// Path segment used by bulk operations
pub const BULK_PATH: &str = "/bulk";

/// A resource operation, independent of any payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// List with filters
    Search,
    /// First match of a filtered list
    SearchOne,
    /// Fetch one resource
    Get(String),
    /// Create one resource from the call's data
    Create,
    /// Create many resources; the call's data holds the items
    BulkCreate,
    /// Replace one resource with the call's data
    Update(String),
    /// Update many resources; the call's data holds the items
    BulkUpdate,
    /// Delete one resource
    Remove(String),
}

impl Operation {
    /// HTTP method of this operation
    pub fn method(&self) -> Method {
        match self {
            Operation::Search | Operation::SearchOne | Operation::Get(_) => Method::GET,
            Operation::Create | Operation::BulkCreate => Method::POST,
            Operation::Update(_) | Operation::BulkUpdate => Method::PUT,
            Operation::Remove(_) => Method::DELETE,
        }
    }

    /// Rewrite a caller's config into the config for this operation
    pub fn apply(&self, mut call: RequestConfig) -> RequestConfig {
        call.method = Some(self.method());

        match self {
            Operation::Search | Operation::Create => {}
            Operation::SearchOne => {
                let mut params: JsonObject = [
                    ("pageSize".to_string(), json!(1)),
                    ("extended".to_string(), json!(true)),
                    ("strict".to_string(), json!(true)),
                ]
                .into_iter()
                .collect();
                params.extend(call.params.take().unwrap_or_default());
                call.params = Some(params);
            }
            Operation::Get(id) | Operation::Update(id) | Operation::Remove(id) => {
                call.url = Some(id.clone());
            }
            Operation::BulkCreate | Operation::BulkUpdate => {
                let items = call.data.take().unwrap_or_else(|| Value::Array(Vec::new()));
                call.url = Some(BULK_PATH.to_string());
                call.data = Some(json!({ "bulk": items }));
            }
        }

        call
    }
}
