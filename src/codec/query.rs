//! Whole-query encoding over `key=value&key=value` strings
//!
//! Encoding is a merge: keys named in the patch are set or removed, every
//! other key in the existing query is left exactly where it was. Decoding
//! only looks at the keys the caller asks for.

use super::value::{decode_value, encode_value};
use serde_json::{Map, Value};

/// Parse a query string into ordered key/value pairs
///
/// A leading `?` is ignored and `+` decodes to a space.
#[must_use]
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Serialize ordered key/value pairs back into a query string
#[must_use]
pub fn serialize_pairs(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// Decode the allowed keys of a query string
///
/// Keys outside `keys` are ignored even when present. When a key appears more
/// than once the last occurrence wins. Returns `None` when none of the allowed
/// keys is present.
///
/// ```
/// use serde_json::json;
/// use sievr::codec::decode_query;
///
/// let decoded = decode_query("page=3&utm=x", &["page", "search"]).unwrap();
/// assert_eq!(decoded.len(), 1);
/// assert_eq!(decoded["page"], json!(3));
///
/// assert!(decode_query("utm=x", &["page"]).is_none());
/// ```
#[must_use]
pub fn decode_query(query: &str, keys: &[&str]) -> Option<Map<String, Value>> {
    let mut decoded = Map::new();
    for (key, token) in parse_pairs(query) {
        if !keys.contains(&key.as_str()) {
            continue;
        }
        decoded.insert(key, decode_value(&token));
    }

    if decoded.is_empty() { None } else { Some(decoded) }
}

/// Merge a patch into an existing query string
///
/// For each `(key, value)` in the patch, the key is removed when the value
/// encodes to nothing, and set otherwise. Setting replaces the first
/// occurrence in place and drops any later duplicates; a new key is appended.
///
/// ```
/// use serde_json::json;
/// use sievr::codec::encode_query;
///
/// let query = encode_query("search=old&page=4&utm=x", &[("search", json!("")), ("page", json!(1))]);
/// assert_eq!(query, "page=1&utm=x");
/// ```
#[must_use]
pub fn encode_query<K, V>(existing: &str, patch: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: std::borrow::Borrow<Value>,
{
    let mut pairs = parse_pairs(existing);

    for (key, value) in patch {
        let key = key.as_ref();
        match encode_value(value.borrow()) {
            None => pairs.retain(|(k, _)| k != key),
            Some(token) => set_pair(&mut pairs, key, token),
        }
    }

    serialize_pairs(&pairs)
}

fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, token: String) {
    let Some(first) = pairs.iter().position(|(k, _)| k == key) else {
        pairs.push((key.to_string(), token));
        return;
    };

    pairs[first].1 = token;
    let mut index = 0;
    pairs.retain(|(k, _)| {
        let keep = k != key || index == first;
        index += 1;
        keep
    });
}
