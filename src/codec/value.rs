//! Single-value token encoding
//!
//! Tokens are component-encoded (the same character set a browser's
//! `encodeURIComponent` leaves alone), so `-`, `_` and `~` survive encoding
//! untouched. That is what lets them act as structural delimiters, and it is
//! also why a string containing them can be mistaken for an array or object
//! on the way back. The ambiguity is part of the format.

use super::coerce::{number_literal, number_text, number_value};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde_json::{Map, Value};

/// Wraps both ends of an array token
pub const ARRAY_SENTINEL: &str = "~";

/// Separates array elements and object pairs
pub const ELEMENT_DELIMITER: &str = "-";

/// Separates an object key from its value
pub const PAIR_SEPARATOR: &str = "_";

/// Characters left unescaped inside a token
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string for use inside a token
#[must_use]
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Percent-decode a token fragment
///
/// Stray `%` signs and invalid UTF-8 never fail; they are kept or replaced.
#[must_use]
pub fn decode_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Encode a value as a query token
///
/// Returns `None` when the value is *absent*: `null`, `""`, `[]`, `{}`, or an
/// object with any member that is itself absent. Array elements that encode
/// to nothing are skipped, but the array itself stays present.
///
/// ```
/// use serde_json::json;
/// use sievr::codec::encode_value;
///
/// assert_eq!(encode_value(&json!(["a", "b"])), Some("~a-b~".to_string()));
/// assert_eq!(encode_value(&json!({"k": 1})), Some("k_1".to_string()));
/// assert_eq!(encode_value(&json!("")), None);
/// ```
#[must_use]
pub fn encode_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_text(n)),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(encode_component(s)),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => {
            let elements: Vec<String> = items.iter().filter_map(encode_value).collect();
            Some(format!(
                "{ARRAY_SENTINEL}{}{ARRAY_SENTINEL}",
                elements.join(ELEMENT_DELIMITER)
            ))
        }
        Value::Object(fields) if fields.is_empty() => None,
        Value::Object(fields) => {
            let pairs = fields
                .iter()
                .map(|(key, field)| {
                    encode_value(field)
                        .map(|token| format!("{}{PAIR_SEPARATOR}{token}", encode_component(key)))
                })
                .collect::<Option<Vec<_>>>()?;
            Some(pairs.join(ELEMENT_DELIMITER))
        }
    }
}

/// Decode a query token into a value
///
/// Never fails: a token that matches no structured shape decodes to the
/// string it spells, and malformed object pairs are dropped.
///
/// ```
/// use serde_json::json;
/// use sievr::codec::decode_value;
///
/// assert_eq!(decode_value("12"), json!(12));
/// assert_eq!(decode_value("false"), json!(false));
/// assert_eq!(decode_value("~title-descending~"), json!(["title", "descending"]));
/// assert_eq!(decode_value("a_1-b_x"), json!({"a": 1, "b": "x"}));
/// assert_eq!(decode_value("hello%20world"), json!("hello world"));
/// ```
#[must_use]
pub fn decode_value(token: &str) -> Value {
    if number_literal(token).is_some()
        && let Some(number) = number_value(token)
    {
        return number;
    }

    let decoded = decode_component(token);
    match decoded.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(inner) = array_body(token) {
        if inner.is_empty() {
            return Value::Array(Vec::new());
        }
        return Value::Array(inner.split(ELEMENT_DELIMITER).map(decode_value).collect());
    }

    if token.contains(PAIR_SEPARATOR) {
        return Value::Object(decode_pairs(token));
    }

    Value::String(decoded)
}

fn array_body(token: &str) -> Option<&str> {
    if token.len() < 2 {
        return None;
    }
    token
        .strip_prefix(ARRAY_SENTINEL)
        .and_then(|rest| rest.strip_suffix(ARRAY_SENTINEL))
}

fn decode_pairs(token: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    for pair in token.split(ELEMENT_DELIMITER) {
        let parts: Vec<&str> = pair.split(PAIR_SEPARATOR).collect();
        if let [key, value] = parts.as_slice() {
            fields.insert(decode_component(key), decode_value(value));
        } else {
            tracing::trace!(pair, "dropping malformed object pair");
        }
    }
    fields
}
