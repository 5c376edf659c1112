//! Utility functions shared by the parsers and the binding generator.
//!
//! - Quoted literal unescaping
//! - HTML attribute and selector escaping (injection-safe)
//! - Compact JSON serialization for attribute payloads
//! - Request path normalization

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Quoted Literals
// ---------------------------------------------------------------------------

/// Strip matching single or double quotes from a token.
/// Returns `None` if the token is not a complete quoted literal.
pub fn strip_quotes(token: &str) -> Option<(char, &str)> {
    let mut chars = token.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    if (first == '"' || first == '\'') && first == last {
        Some((first, &token[1..token.len() - 1]))
    } else {
        None
    }
}

/// Resolve backslash escapes inside a quoted literal body.
///
/// `\n`, `\r` and `\t` map to their control characters; any other escaped
/// character (including the active quote and the backslash itself) is kept
/// verbatim. A trailing lone backslash is preserved.
pub fn unescape_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Attribute Escaping
// ---------------------------------------------------------------------------

/// Escape a string for safe embedding inside a double- or single-quoted HTML
/// attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Reverse [`escape_attr`]. Unknown entities are kept as written.
pub fn unescape_attr(s: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&quot;", '"'),
        ("&#39;", '\''),
        ("&lt;", '<'),
        ("&gt;", '>'),
    ];

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape a value for use inside a double-quoted CSS attribute selector,
/// e.g. the `submit` in `[data-role="submit"]`.
pub fn escape_selector_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize a JSON value compactly for a transport attribute payload.
pub fn serialize_value(value: &Value) -> String {
    value.to_string()
}

/// Serialize a header map as a compact JSON object with keys in sorted order.
pub fn serialize_headers(headers: &BTreeMap<String, String>) -> String {
    let object: Map<String, Value> = headers
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(object).to_string()
}

/// Deserialize a header object, reading scalar values in their string form.
pub fn deserialize_headers<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name, param_to_string(&value)))
        .collect())
}

/// Optional form of [`deserialize_headers`]; `null` reads as `None`.
pub fn deserialize_optional_headers<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw.map(|headers| {
        headers
            .into_iter()
            .map(|(name, value)| (name, param_to_string(&value)))
            .collect()
    }))
}

/// String form of a positional path parameter.
/// Strings are used verbatim; everything else uses its JSON text.
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Request Paths
// ---------------------------------------------------------------------------

/// Drop the query string and fragment from a request target.
pub fn request_path(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
