//! Numeric and textual coercion of dynamic values
//!
//! The codec and the reducer both need to know whether a value "is a number".
//! The codec asks the strict question (does this token spell a number
//! literal?), the reducer asks the loose one (does this field value coerce to
//! a number?). Both share the literal grammar defined here.

use serde_json::{Number, Value};

/// Parse a token as a complete number literal
///
/// Accepts surrounding whitespace, an optional sign, decimal digits with an
/// optional fraction and exponent, and unsigned `0x`/`0o`/`0b` integer
/// literals. The empty string is not a literal, and neither are the words
/// `inf`, `nan` or `infinity`.
#[must_use]
pub fn number_literal(token: &str) -> Option<f64> {
    let s = token.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(value) = radix_literal(s) {
        return Some(value);
    }

    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let starts_numeric = body.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    let all_numeric = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));

    if !starts_numeric || !all_numeric {
        return None;
    }

    s.parse::<f64>().ok()
}

fn radix_literal(s: &str) -> Option<f64> {
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        (rest, 8)
    } else if let Some(rest) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (rest, 2)
    } else {
        return None;
    };

    if digits.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let value = u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
    value
}

/// Build a JSON number from a literal token
///
/// Integer tokens keep their integer representation so that they deserialize
/// into integer fields; everything else becomes a float. Non-finite values
/// cannot be represented and yield `None`.
#[must_use]
pub fn number_value(token: &str) -> Option<Value> {
    let trimmed = token.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Value::from(int));
    }
    if let Ok(uint) = trimmed.parse::<u64>() {
        return Some(Value::from(uint));
    }
    number_literal(trimmed)
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Coerce a field value to a number
///
/// Returns `NaN` when the value has no numeric reading. `null`, booleans,
/// blank strings and empty arrays all coerce to numbers; a one-element array
/// coerces through its only element's text.
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => str_to_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [only] => str_to_number(&to_text(only)),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn str_to_number(s: &str) -> f64 {
    if s.trim().is_empty() {
        0.0
    } else {
        number_literal(s).unwrap_or(f64::NAN)
    }
}

/// Whether a field value has a numeric reading
#[must_use]
pub fn is_numeric(value: &Value) -> bool {
    !to_number(value).is_nan()
}

/// Render a field value as display text
///
/// Strings are returned as-is, numbers in their shortest form, arrays as
/// their elements joined by `,` (with `null` elements rendered empty), and
/// objects as compact JSON.
#[must_use]
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Render a number the way it appears in a query token
#[must_use]
pub fn number_text(n: &Number) -> String {
    if n.is_f64() {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_literal_accepts_decimal_forms() {
        assert_eq!(number_literal("42"), Some(42.0));
        assert_eq!(number_literal("-3.5"), Some(-3.5));
        assert_eq!(number_literal("+7"), Some(7.0));
        assert_eq!(number_literal(".5"), Some(0.5));
        assert_eq!(number_literal("1e3"), Some(1000.0));
        assert_eq!(number_literal(" 12 "), Some(12.0));
    }

    #[test]
    fn test_number_literal_accepts_radix_forms() {
        assert_eq!(number_literal("0x10"), Some(16.0));
        assert_eq!(number_literal("0o10"), Some(8.0));
        assert_eq!(number_literal("0b101"), Some(5.0));
        assert_eq!(number_literal("0x"), None);
    }

    #[test]
    fn test_number_literal_rejects_words_and_fragments() {
        assert_eq!(number_literal(""), None);
        assert_eq!(number_literal("   "), None);
        assert_eq!(number_literal("inf"), None);
        assert_eq!(number_literal("NaN"), None);
        assert_eq!(number_literal("infinity"), None);
        assert_eq!(number_literal("12abc"), None);
        assert_eq!(number_literal("1-2"), None);
        assert_eq!(number_literal("."), None);
    }

    #[test]
    fn test_number_value_keeps_integers() {
        assert_eq!(number_value("3"), Some(json!(3)));
        assert_eq!(number_value("-3"), Some(json!(-3)));
        assert_eq!(number_value("1.5"), Some(json!(1.5)));
        assert_eq!(number_value("abc"), None);
    }

    #[test]
    fn test_to_number_coercion() {
        assert!(to_number(&json!(null)).abs() < f64::EPSILON);
        assert!((to_number(&json!(true)) - 1.0).abs() < f64::EPSILON);
        assert!(to_number(&json!("")).abs() < f64::EPSILON);
        assert!((to_number(&json!("12")) - 12.0).abs() < f64::EPSILON);
        assert!((to_number(&json!(["5"])) - 5.0).abs() < f64::EPSILON);
        assert!(to_number(&json!("Zeta")).is_nan());
        assert!(to_number(&json!(["a", "b"])).is_nan());
        assert!(to_number(&json!({"a": 1})).is_nan());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&json!("Hello")), "Hello");
        assert_eq!(to_text(&json!(3)), "3");
        assert_eq!(to_text(&json!(3.0)), "3");
        assert_eq!(to_text(&json!(["a", null, "b"])), "a,,b");
        assert_eq!(to_text(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
