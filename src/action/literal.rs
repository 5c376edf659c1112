//! Argument deserializer.
//!
//! Maps one trimmed argument token to an [`ActionValue`]. Invocation-shaped
//! tokens are returned as raw strings; this module never recurses.

use serde_json::{Number, Value};

use crate::utils;
use crate::ActionValue;

/// Whether a token looks like a nested `name(...)` invocation:
/// a `(` after the first character and a trailing `)`.
pub fn looks_like_invocation(token: &str) -> bool {
    matches!(token.find('('), Some(idx) if idx > 0) && token.ends_with(')')
}

/// Deserialize a single argument token.
///
/// Returns `None` for an empty token so the caller drops it from the
/// argument list instead of keeping a placeholder.
pub fn deserialize_argument(token: &str) -> Option<ActionValue> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if looks_like_invocation(token) {
        return Some(Value::String(token.to_string()));
    }
    Some(deserialize_literal(token))
}

/// Literal rules: quoted string, `true`/`false`, `null`, number, bare word.
pub fn deserialize_literal(token: &str) -> ActionValue {
    if let Some((_, body)) = utils::strip_quotes(token) {
        return Value::String(utils::unescape_quoted(body));
    }

    match token {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => parse_number(token).unwrap_or_else(|| Value::String(token.to_string())),
    }
}

/// Parse a decimal numeric literal: optional sign, digits with an optional
/// fraction, optional exponent. Integral values stay integers.
fn parse_number(token: &str) -> Option<Value> {
    if !is_numeric_literal(token) {
        return None;
    }
    if let Ok(n) = token.parse::<i64>() {
        return Some(Value::Number(n.into()));
    }
    let f = token.parse::<f64>().ok()?;
    Number::from_f64(f).map(Value::Number)
}

fn is_numeric_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
