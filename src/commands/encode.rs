//! Encode command - merge values into a query string

use crate::{SievrError, codec, output};
use serde_json::Value;

type Result<T> = std::result::Result<T, SievrError>;

/// Execute the encode command
///
/// # Errors
/// Returns `SievrError::InvalidInput` if a pair is not of the form `KEY=VALUE`
pub fn execute(query: &str, pairs: &[String], json: bool) -> Result<()> {
    let patch = pairs
        .iter()
        .map(|pair| parse_pair(pair))
        .collect::<Result<Vec<_>>>()?;

    let encoded = codec::encode_query(query, &patch);
    if json {
        output::print_json(&encoded)?;
    } else {
        println!("{encoded}");
    }
    Ok(())
}

/// Split `KEY=VALUE`, reading VALUE as JSON and falling back to a plain string
fn parse_pair(pair: &str) -> Result<(String, Value)> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| SievrError::InvalidInput(format!("Expected KEY=VALUE, got '{pair}'")))?;
    if key.is_empty() {
        return Err(SievrError::InvalidInput(format!("Missing key in '{pair}'")));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_pair_json_and_text() {
        assert_eq!(parse_pair("page=2").unwrap(), ("page".to_string(), json!(2)));
        assert_eq!(parse_pair(r#"tags=["a","b"]"#).unwrap().1, json!(["a", "b"]));
        assert_eq!(parse_pair("search=hello world").unwrap().1, json!("hello world"));
        assert_eq!(parse_pair("search=").unwrap().1, json!(""));
    }

    #[test]
    fn test_parse_pair_rejects_malformed() {
        assert!(matches!(parse_pair("page"), Err(SievrError::InvalidInput(_))));
        assert!(matches!(parse_pair("=2"), Err(SievrError::InvalidInput(_))));
    }
}
