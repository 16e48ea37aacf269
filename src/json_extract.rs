//! Recovery of JSON blobs embedded in Cricbuzz HTML.
//!
//! The pages inline their hydration data either as plain JSON or as
//! backslash-escaped JSON inside a string literal. Extraction is a plain
//! balanced-delimiter scan; candidates that fail to parse are skipped and the
//! scan resumes at the next occurrence of the key token.

use serde_json::Value;

/// Extracts the balanced `{...}` or `[...]` region starting at `start`.
///
/// Returns the region text and the index one past its closing delimiter, or
/// `None` when `start` is not on an opener or the region is truncated.
pub fn extract_balanced(source: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = source.as_bytes();
    let opener = *bytes.get(start)?;
    let closer = match opener {
        b'{' => b'}',
        b'[' => b']',
        _ => return None,
    };
    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(start) {
        if byte == opener {
            depth += 1;
        } else if byte == closer {
            depth -= 1;
            if depth == 0 {
                return Some((&source[start..=i], i + 1));
            }
        }
    }
    None
}

/// Parses a blob that may be escaped (`{\"a\":1}`) or plain JSON.
pub fn parse_escaped_json(text: &str) -> Option<Value> {
    serde_json::from_str(&text.replace("\\\"", "\"")).ok()
}

fn object_tokens(key: &str) -> [String; 2] {
    [format!("\\\"{key}\\\":{{"), format!("\"{key}\":{{")]
}

fn array_tokens(key: &str) -> [String; 2] {
    [format!("\\\"{key}\\\":["), format!("\"{key}\":[")]
}

fn pick_first(html: &str, tokens: &[String]) -> Option<Value> {
    for token in tokens {
        let mut search_from = 0;
        while let Some(found) = html[search_from..].find(token.as_str()) {
            let token_index = search_from + found;
            let region_start = token_index + token.len() - 1;
            match extract_balanced(html, region_start) {
                None => search_from = token_index + token.len(),
                Some((body, end_index)) => {
                    if let Some(value) = parse_escaped_json(body) {
                        return Some(value);
                    }
                    search_from = end_index;
                }
            }
        }
    }
    None
}

fn pick_all(html: &str, tokens: &[String]) -> Vec<Value> {
    let mut values = Vec::new();
    for token in tokens {
        let mut search_from = 0;
        while let Some(found) = html[search_from..].find(token.as_str()) {
            let token_index = search_from + found;
            let region_start = token_index + token.len() - 1;
            match extract_balanced(html, region_start) {
                None => search_from = token_index + token.len(),
                Some((body, end_index)) => {
                    if let Some(value) = parse_escaped_json(body) {
                        values.push(value);
                    }
                    search_from = end_index;
                }
            }
        }
    }
    values
}

pub fn pick_object_by_key(html: &str, key: &str) -> Option<Value> {
    pick_first(html, &object_tokens(key))
}

pub fn pick_array_by_key(html: &str, key: &str) -> Option<Value> {
    pick_first(html, &array_tokens(key))
}

pub fn pick_all_objects_by_key(html: &str, key: &str) -> Vec<Value> {
    pick_all(html, &object_tokens(key))
}

pub fn pick_all_arrays_by_key(html: &str, key: &str) -> Vec<Value> {
    pick_all(html, &array_tokens(key))
}

/// Trimmed text of a string value, or a number rendered the way the site
/// renders it. Empty strings and other value kinds yield `None`.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                n.as_f64().map(|f| format!("{f}"))
            }
        }
        _ => None,
    }
}

/// First key with usable text, probed in order.
pub fn pick_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(value_text))
}

/// Like [`pick_text`] with the display placeholder as fallback.
pub fn stat_text(value: &Value, keys: &[&str]) -> String {
    pick_text(value, keys).unwrap_or_else(|| "-".to_string())
}

/// Truthiness of the first present, non-null key; `default` when no key is.
pub fn pick_bool_or(value: &Value, keys: &[&str], default: bool) -> bool {
    for key in keys {
        if let Some(v) = value.get(key)
            && !v.is_null()
        {
            return match v {
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                Value::String(s) => !s.is_empty(),
                _ => true,
            };
        }
    }
    default
}

pub fn pick_bool(value: &Value, keys: &[&str]) -> bool {
    pick_bool_or(value, keys, false)
}

pub fn value_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

pub fn pick_u64(value: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(value_u64))
}
