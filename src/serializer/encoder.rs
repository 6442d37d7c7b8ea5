//! Query string encoding and decoding

use super::types::{ArrayFormat, Serializer};
use crate::types::{JsonObject, JsonValue};
use serde_json::Value;

impl Serializer {
    /// Encode a params object into a query string (without the leading `?`)
    pub fn serialize(&self, params: &JsonObject) -> String {
        let mut pairs = Vec::new();
        for (key, value) in params {
            self.encode_value(key, value, &mut pairs);
        }
        pairs.join("&")
    }

    /// Encode an arbitrary JSON value; non-objects produce an empty string
    pub fn serialize_value(&self, value: &JsonValue) -> String {
        match value {
            Value::Object(map) => self.serialize(map),
            _ => String::new(),
        }
    }

    fn encode_value(&self, prefix: &str, value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Null => {}
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                out.push(pair(prefix, &scalar_text(value)));
            }
            Value::Array(items) => {
                let items: Vec<&Value> = items.iter().filter(|v| !v.is_null()).collect();
                if items.is_empty() {
                    return;
                }

                if self.array_format() == ArrayFormat::Comma && items.iter().all(|v| is_scalar(v)) {
                    // A lone element keeps its brackets so it still reads back as an array
                    if items.len() == 1 {
                        out.push(pair(&format!("{prefix}[]"), &scalar_text(items[0])));
                    } else {
                        let joined = items
                            .iter()
                            .map(|v| percent_encode(&scalar_text(v)))
                            .collect::<Vec<_>>()
                            .join(",");
                        out.push(format!("{}={joined}", percent_encode(prefix)));
                    }
                    return;
                }

                for (index, item) in items.into_iter().enumerate() {
                    let key = match self.array_format() {
                        ArrayFormat::Indices | ArrayFormat::Comma => format!("{prefix}[{index}]"),
                        ArrayFormat::Brackets => format!("{prefix}[]"),
                        ArrayFormat::Repeat => prefix.to_string(),
                    };
                    self.encode_value(&key, item, out);
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    self.encode_value(&format!("{prefix}[{key}]"), item, out);
                }
            }
        }
    }

    /// Decode a query string produced by [`Serializer::serialize`].
    ///
    /// Scalars come back as strings. Raw commas split values into arrays only
    /// when the serializer uses [`ArrayFormat::Comma`].
    pub fn parse(&self, query: &str) -> JsonObject {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut root = Value::Object(JsonObject::new());

        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let (raw_key, raw_value) = segment.split_once('=').unwrap_or((segment, ""));
            let key = percent_decode(raw_key);

            let value = if self.array_format() == ArrayFormat::Comma && raw_value.contains(',') {
                Value::Array(
                    raw_value
                        .split(',')
                        .map(|v| Value::String(percent_decode(v)))
                        .collect(),
                )
            } else {
                Value::String(percent_decode(raw_value))
            };

            let (head, path) = split_key(&key);
            let mut segments = Vec::with_capacity(path.len() + 1);
            segments.push(head);
            segments.extend(path);
            insert(&mut root, &segments, value);
        }

        match root {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    }
}

fn pair(key: &str, value: &str) -> String {
    format!("{}={}", percent_encode(key), percent_encode(value))
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Split `a[b][]` into `("a", ["b", ""])`. Malformed keys stay whole.
fn split_key(key: &str) -> (String, Vec<String>) {
    let Some(open) = key.find('[') else {
        return (key.to_string(), Vec::new());
    };
    if open == 0 || !key.ends_with(']') {
        return (key.to_string(), Vec::new());
    }

    let head = key[..open].to_string();
    let mut segments = Vec::new();
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        match stripped.find(']') {
            Some(close) => {
                segments.push(stripped[..close].to_string());
                rest = &stripped[close + 1..];
            }
            None => return (key.to_string(), Vec::new()),
        }
    }
    if !rest.is_empty() {
        return (key.to_string(), Vec::new());
    }

    (head, segments)
}

fn insert(slot: &mut Value, segments: &[String], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        match slot {
            Value::Null => *slot = value,
            Value::Array(items) => items.push(value),
            existing => {
                let previous = existing.take();
                *existing = Value::Array(vec![previous, value]);
            }
        }
        return;
    };

    let is_index = is_index_segment(segment);
    // The root is always an object, even when the first key looks numeric
    if is_index && !slot.is_object() {
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        let Value::Array(items) = slot else { return };

        let index = if segment.is_empty() {
            // `a[][x]=1&a[][y]=2` fills one object until a leaf key repeats
            match items.last() {
                Some(Value::Object(last)) if extends_last(last, rest) => items.len() - 1,
                _ => items.len(),
            }
        } else {
            segment.parse::<usize>().unwrap_or(items.len()).min(items.len())
        };
        if index == items.len() {
            items.push(Value::Null);
        }
        insert(&mut items[index], rest, value);
        return;
    }

    if !slot.is_object() {
        *slot = Value::Object(JsonObject::new());
    }
    if let Value::Object(map) = slot {
        let entry = map.entry(segment.clone()).or_insert(Value::Null);
        insert(entry, rest, value);
    }
}

fn extends_last(last: &JsonObject, rest: &[String]) -> bool {
    let Some(next) = rest.first() else {
        return false;
    };
    if is_index_segment(next) {
        return false;
    }
    match last.get(next) {
        None => true,
        Some(existing) => rest.len() > 1 && (existing.is_array() || existing.is_object()),
    }
}

fn is_index_segment(segment: &str) -> bool {
    segment.is_empty() || segment.bytes().all(|b| b.is_ascii_digit())
}

/// Percent-encode everything except RFC 3986 unreserved characters
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decode `%XX` escapes and `+` as space; invalid escapes are kept verbatim
pub fn percent_decode(input: &str) -> String {
    let input = input.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned()
}
