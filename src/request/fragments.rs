//! URL composition from path fragments

use super::config::{BaseRequestConfig, RequestConfig};

/// Strip one leading `http://`, `https://` or `/` and one trailing `/`
pub fn strip_fragment(fragment: &str) -> &str {
    let fragment = fragment
        .strip_prefix("https://")
        .or_else(|| fragment.strip_prefix("http://"))
        .or_else(|| fragment.strip_prefix('/'))
        .unwrap_or(fragment);
    fragment.strip_suffix('/').unwrap_or(fragment)
}

/// Join fragments into one absolute URL.
///
/// Empty fragments are dropped. The scheme is `https` when any fragment
/// mentions `https`, otherwise `http`. With no fragments at all the result
/// is just the scheme (`http://`).
pub fn compose_url<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut secure = false;
    let mut parts = Vec::new();

    for fragment in fragments {
        if fragment.is_empty() {
            continue;
        }
        if fragment.contains("https") {
            secure = true;
        }
        // Filtering happens before stripping, so `/` survives as an empty segment
        parts.push(strip_fragment(fragment));
    }

    let protocol = if secure { "https" } else { "http" };
    format!("{protocol}://{}", parts.join("/"))
}

/// Ordered URL fragments for one call
pub(crate) fn url_fragments<'a>(
    base: &'a BaseRequestConfig,
    call: &'a RequestConfig,
) -> Vec<&'a str> {
    let url_map = call.base_url_map.as_ref().or(base.base_url_map.as_ref());
    let url_name = call
        .base_url_name
        .as_deref()
        .or(base.base_url_name.as_deref());

    // A selected name that is missing from the map yields no root at all
    let root = match (url_map, url_name) {
        (Some(map), Some(name)) => map.get(name).map(String::as_str),
        _ => base.base_url.as_deref(),
    };

    let mut fragments = Vec::with_capacity(4 + base.url_parts.len() + call.url_parts.len());
    fragments.extend(root);
    fragments.extend(base.url.as_deref());
    fragments.extend(base.url_parts.iter().map(String::as_str));
    fragments.extend(call.base_url.as_deref());
    fragments.extend(call.url.as_deref());
    fragments.extend(call.url_parts.iter().map(String::as_str));
    fragments
}
