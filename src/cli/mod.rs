//! CLI module
//!
//! Command-line interface for composing, sending and signing requests.
//!
//! # Commands
//!
//! - `compose` - Print the composed request without sending it
//! - `request` - Send a request and print the response body
//! - `pages` - Walk a paginated search and print each page
//! - `sign` - Produce a signature header for a body
//! - `verify` - Check a signature header against a body
//! - `serve` - Start a webhook receiver that verifies signatures

mod commands;
mod runner;
mod server;

pub use commands::{CallArgs, Cli, Commands, OutputFormat};
pub use runner::{build_call, Runner};
pub use server::{router, serve, ServerConfig, WEBHOOK_PATH};
