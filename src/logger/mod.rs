//! Request logging
//!
//! A data source may carry a [`RequestLogger`]. When present it sees every
//! request before dispatch and every response or failure afterwards. Logging
//! never changes the outcome of a call.
//!
//! [`TracingLogger`] writes one line per event through `tracing`:
//!
//! ```text
//! GET https://api.example.com/users?page=1                 (debug)
//! GET https://api.example.com/users?page=1 200 OK (35ms)   (info)
//! POST https://api.example.com/users {"name":"x"} 422 Unprocessable Entity (12ms)  (error)
//! ```

mod message;
mod tracing_logger;
mod types;

pub use message::MessageBuilder;
pub use tracing_logger::TracingLogger;
pub use types::{RawResponse, RequestLogger, FALLBACK_STATUS};
