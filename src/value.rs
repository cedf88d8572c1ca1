//! Cell-level value semantics shared by every engine module.
//!
//! Datasets arrive as JSON-style rows, so a "number" may be a real JSON
//! number, a boolean, or a numeric string, and "missing" covers an absent
//! key, an explicit null, and the empty string. The upstream application was
//! deliberately loose about these coercions; the helpers here pin that
//! behavior down in one place so the profiler, the cleaner and the detectors
//! all agree on what a cell means.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// True when the cell is absent, null, or the empty string.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Coerce a cell to a finite number, if it represents one.
///
/// Booleans coerce to 1/0 and numeric strings are trimmed then parsed;
/// anything non-finite (or non-scalar) is rejected.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// True when the string parses as a calendar date or datetime.
pub fn parses_as_date(raw: &str) -> bool {
    let s = raw.trim();
    if s.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }
    if DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}

/// Lenient stringification matching the upstream `String(v || '')` coercion:
/// null, missing, the empty string, `false` and `0` all become the empty
/// string; everything else is rendered as text.
pub fn lenient_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(b)) => {
            if *b {
                "true".to_owned()
            } else {
                String::new()
            }
        }
        Some(Value::Number(n)) => {
            let v = n.as_f64().unwrap_or(0.0);
            if v == 0.0 { String::new() } else { v.to_string() }
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Type-tagged key for cardinality sets, so the number `10` and the string
/// `"10"` count as distinct values.
pub fn distinct_key(value: &Value) -> String {
    match value {
        Value::String(s) => format!("s:{s}"),
        Value::Number(n) => format!("n:{}", n.as_f64().unwrap_or(f64::NAN)),
        Value::Bool(b) => format!("b:{b}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_detection() {
        assert!(is_missing(None));
        assert!(is_missing(Some(&Value::Null)));
        assert!(is_missing(Some(&json!(""))));
        assert!(!is_missing(Some(&json!(0))));
        assert!(!is_missing(Some(&json!(false))));
        assert!(!is_missing(Some(&json!(" "))));
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce_number(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_number(&json!("  42 ")), Some(42.0));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!(false)), Some(0.0));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!("inf")), None, "non-finite rejected");
        assert_eq!(coerce_number(&Value::Null), None);
    }

    #[test]
    fn test_date_parsing() {
        assert!(parses_as_date("2023-01-15"));
        assert!(parses_as_date("2023-01-15T10:30:00"));
        assert!(parses_as_date("01/15/2023"));
        assert!(parses_as_date("January 15, 2023"));
        assert!(!parses_as_date("not a date"));
        assert!(!parses_as_date("12345"));
        assert!(!parses_as_date(""));
    }

    #[test]
    fn test_lenient_string_falsy_values() {
        assert_eq!(lenient_string(Some(&json!(0))), "");
        assert_eq!(lenient_string(Some(&json!(false))), "");
        assert_eq!(lenient_string(Some(&Value::Null)), "");
        assert_eq!(lenient_string(None), "");
        assert_eq!(lenient_string(Some(&json!(123456789))), "123456789");
        assert_eq!(lenient_string(Some(&json!(3.5))), "3.5");
        assert_eq!(lenient_string(Some(&json!("Jon"))), "Jon");
    }

    #[test]
    fn test_distinct_key_separates_types() {
        assert_ne!(distinct_key(&json!(10)), distinct_key(&json!("10")));
        assert_eq!(distinct_key(&json!(10)), distinct_key(&json!(10.0)));
    }
}
