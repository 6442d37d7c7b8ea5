//! Config file loading
//!
//! Base configs and per-call configs can live in YAML or JSON files. Files
//! are interpolated with `${VAR}` placeholders before parsing:
//!
//! ```yaml
//! base_url: https://api.example.com
//! url: users
//! bearer_token: ${API_TOKEN}
//! timeout_ms: ${API_TIMEOUT:-10000}
//! serializer:
//!   array: comma
//! signer:
//!   secret_key: ${WEBHOOK_SECRET:-}
//! ```

use crate::error::{Error, Result};
use crate::request::{BaseRequestConfig, RequestConfig};
use crate::template::interpolate_env;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load a base config from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<BaseRequestConfig> {
    let config: BaseRequestConfig = load_file(path.as_ref())?;
    validate_config(&config);
    Ok(config)
}

/// Parse a base config from YAML (or JSON) text
pub fn load_config_from_str(text: &str) -> Result<BaseRequestConfig> {
    let config: BaseRequestConfig = parse(&interpolate_env(text)?, false)?;
    validate_config(&config);
    Ok(config)
}

/// Load a per-call config from a YAML or JSON file
pub fn load_request(path: impl AsRef<Path>) -> Result<RequestConfig> {
    load_file(path.as_ref())
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    debug!("Loading config from {}", path.display());
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse(&interpolate_env(&content)?, is_json)
}

fn parse<T: DeserializeOwned>(text: &str, is_json: bool) -> Result<T> {
    if is_json {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Flag settings that will silently produce odd URLs
fn validate_config(config: &BaseRequestConfig) {
    if let (Some(map), Some(name)) = (&config.base_url_map, &config.base_url_name) {
        if !map.contains_key(name) {
            warn!("base_url_name '{}' is not in base_url_map", name);
        }
    }

    if config.base_url.is_none() && config.base_url_map.is_none() && config.url.is_none() {
        warn!("Config has no base_url, base_url_map or url");
    }
}
