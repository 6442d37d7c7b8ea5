//! CLI commands and argument parsing

use crate::types::Method;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Request CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-request")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base config file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Root URL, overriding the config file
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log every request and response body
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the composed request as JSON without sending it
    Compose {
        #[command(flatten)]
        call: CallArgs,
    },

    /// Send a request and print the response body
    Request {
        #[command(flatten)]
        call: CallArgs,

        /// Print a {success, status, method, data} envelope instead of failing
        #[arg(long)]
        raw: bool,
    },

    /// Walk a paginated search, printing one line per page
    Pages {
        #[command(flatten)]
        call: CallArgs,

        /// Stop after this many pages
        #[arg(long)]
        bulk_size: Option<u64>,
    },

    /// Print a signature header for a body
    Sign {
        /// Shared secret
        #[arg(short, long)]
        secret: String,

        /// Body to sign (empty when omitted)
        #[arg(short, long, default_value = "")]
        data: String,

        /// Unix timestamp to sign with (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Check a signature header against a body
    Verify {
        /// Shared secret
        #[arg(short, long)]
        secret: String,

        /// Signature header value (t=...,v1=...)
        #[arg(long)]
        signature: String,

        /// Signed body
        #[arg(short, long, default_value = "")]
        data: String,

        /// Reject signatures older than this many seconds
        #[arg(long)]
        tolerance: Option<u64>,
    },

    /// Start a webhook receiver that verifies signatures
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Shared secret
        #[arg(short, long)]
        secret: String,

        /// Header carrying the signature
        #[arg(long, default_value = crate::signer::DEFAULT_SIGNATURE_HEADER)]
        header: String,

        /// Reject signatures older than this many seconds
        #[arg(long)]
        tolerance: Option<u64>,
    },
}

/// Per-call options shared by request subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct CallArgs {
    /// Per-call config file (YAML or JSON); flags below override it
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// HTTP method
    #[arg(short = 'X', long)]
    pub method: Option<Method>,

    /// Path appended to the base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Query param as key=value (repeatable)
    #[arg(short = 'q', long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Header as name:value (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Body; parsed as JSON when possible, sent verbatim otherwise
    #[arg(short, long)]
    pub data: Option<String>,

    /// Bearer token
    #[arg(long)]
    pub bearer_token: Option<String>,

    /// API key sent as x-api-key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Basic credentials as user:password
    #[arg(long, value_name = "USER:PASSWORD")]
    pub basic: Option<String>,

    /// Form-encode the body
    #[arg(long)]
    pub urlencoded: bool,

    /// Send the body as multipart form data
    #[arg(long)]
    pub multipart: bool,

    /// Mark the body as XML
    #[arg(long)]
    pub xml: bool,

    /// Timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one value per line)
    Json,
    /// Indented JSON
    Pretty,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn parse_header(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected name:value, got '{s}'"))
}
