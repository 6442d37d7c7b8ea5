//! Environment interpolation for config files
//!
//! Handles `${VAR}` and `${VAR:-default}` placeholders. Interpolation runs on
//! the raw file text before parsing, so placeholders work in any field.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Regex for matching placeholders: ${NAME} or ${NAME:-fallback}
static ENV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").unwrap()
});

/// Replace placeholders with values from the process environment
pub fn interpolate_env(text: &str) -> Result<String> {
    interpolate_with(text, |name| std::env::var(name).ok())
}

/// Replace placeholders using `lookup`.
///
/// A placeholder without a value and without a fallback is an error; all
/// missing names are reported together.
pub fn interpolate_with<F>(text: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();

    let rendered = ENV_REGEX.replace_all(text, |cap: &Captures<'_>| {
        let name = &cap[1];
        match (lookup(name), cap.get(2)) {
            (Some(value), _) => value,
            (None, Some(fallback)) => fallback.as_str().to_string(),
            (None, None) => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// Check if a string contains placeholders
pub fn has_placeholders(s: &str) -> bool {
    ENV_REGEX.is_match(s)
}

/// Extract all placeholder names
pub fn extract_variables(text: &str) -> Vec<String> {
    ENV_REGEX
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect()
}
