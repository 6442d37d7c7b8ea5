//! CLI runner - executes commands

use crate::cli::commands::{CallArgs, Cli, Commands, OutputFormat};
use crate::cli::server::{self, ServerConfig};
use crate::config::{load_config, load_request};
use crate::data_source::DataSource;
use crate::error::{Error, Result, ResultExt};
use crate::request::{compose_request, BaseRequestConfig, RequestConfig};
use crate::serializer::{percent_encode, Serializer};
use crate::signer::{HmacSigner, Verifier};
use crate::types::{JsonValue, LogLevel};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Compose { call } => self.compose(call),
            Commands::Request { call, raw } => self.request(call, *raw).await,
            Commands::Pages { call, bulk_size } => self.pages(call, *bulk_size).await,
            Commands::Sign {
                secret,
                data,
                timestamp,
            } => self.sign(secret, data, *timestamp),
            Commands::Verify {
                secret,
                signature,
                data,
                tolerance,
            } => self.verify(secret, signature, data, *tolerance),
            Commands::Serve {
                port,
                secret,
                header,
                tolerance,
            } => {
                let config = ServerConfig {
                    secret: secret.clone(),
                    header: header.clone(),
                    tolerance: tolerance.map(Duration::from_secs),
                };
                server::serve(config, *port).await
            }
        }
    }

    /// Base config from the config file and global flags
    fn base_config(&self) -> Result<BaseRequestConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => BaseRequestConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url = Some(base_url.clone());
        }
        if self.cli.verbose {
            config.logger = true;
            config.log_level = LogLevel::Debug;
        }

        Ok(config)
    }

    fn compose(&self, call: &CallArgs) -> Result<()> {
        let base = self.base_config()?;
        let request = compose_request(&base, &build_call(call)?);
        self.print(&request.describe())
    }

    async fn request(&self, call: &CallArgs, raw: bool) -> Result<()> {
        let source: DataSource = DataSource::new(self.base_config()?)?;
        let call = build_call(call)?;

        if raw {
            let response = source.common_raw(call).await;
            return self.print(&response);
        }

        let body: JsonValue = source.common(call).await?;
        self.print(&body)
    }

    async fn pages(&self, call: &CallArgs, bulk_size: Option<u64>) -> Result<()> {
        let source: DataSource = DataSource::new(self.base_config()?)?;
        let mut walker = source.bulk_search(build_call(call)?);
        if let Some(bulk_size) = bulk_size {
            walker = walker.bulk_size(bulk_size).on_complete(|next_page| async move {
                eprintln!("Stopped at page cap; next page is {next_page}");
                Ok(())
            });
        }

        let mut count = 0;
        while let Some(page) = walker.next_page().await? {
            count += 1;
            self.print(&page)?;
        }
        debug!("Fetched {} pages", count);

        Ok(())
    }

    fn sign(&self, secret: &str, data: &str, timestamp: Option<i64>) -> Result<()> {
        let signer = HmacSigner::with_secret(secret);
        let signature = match timestamp {
            Some(timestamp) => signer.sign_at(data, timestamp)?,
            None => signer.sign(data)?,
        };
        self.print(&json!({ "header": signer.header(), "signature": signature }))
    }

    fn verify(
        &self,
        secret: &str,
        signature: &str,
        data: &str,
        tolerance: Option<u64>,
    ) -> Result<()> {
        let mut verifier = Verifier::new(secret);
        if let Some(seconds) = tolerance {
            verifier = verifier.with_tolerance(Duration::from_secs(seconds));
        }

        match verifier.verify(Some(signature), data) {
            Ok(()) => self.print(&json!({ "valid": true })),
            Err(e) => Err(Error::signature(e.to_string())),
        }
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{output}");
        Ok(())
    }
}

/// Turn call flags (and an optional call file) into a per-call config
pub fn build_call(args: &CallArgs) -> Result<RequestConfig> {
    let mut call = match &args.request {
        Some(path) => load_request(path)
            .with_context(|| format!("Failed to load call file '{}'", path.display()))?,
        None => RequestConfig::new(),
    };

    if let Some(method) = args.method {
        call.method = Some(method);
    }
    if let Some(url) = &args.url {
        call.url = Some(url.clone());
    }

    if !args.params.is_empty() {
        let query = args
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let mut params = call.params.take().unwrap_or_default();
        params.extend(Serializer::default().parse(&query));
        call.params = Some(params);
    }

    for (name, value) in &args.headers {
        call.headers.insert(name.clone(), value.clone());
    }

    if let Some(data) = &args.data {
        let body =
            serde_json::from_str(data).unwrap_or_else(|_| JsonValue::String(data.clone()));
        call.data = Some(body);
    }

    if let Some(token) = &args.bearer_token {
        call.credentials.bearer_token = Some(token.clone());
    }
    if let Some(key) = &args.api_key {
        call.credentials.api_key = Some(key.clone());
    }
    if let Some(basic) = &args.basic {
        let (username, password) = basic
            .split_once(':')
            .ok_or_else(|| Error::config("--basic expects user:password"))?;
        call = call.basic_auth(username, password);
    }

    call.urlencoded |= args.urlencoded;
    call.multipart |= args.multipart;
    call.xml |= args.xml;

    if let Some(timeout_ms) = args.timeout_ms {
        call.timeout_ms = Some(timeout_ms);
    }

    Ok(call)
}
