//! Loose readings of JSON values shared by the normalizers.

use serde_json::Value;

/// Truthiness of a loosely typed field: `null`, `false`, zero and empty
/// strings, arrays or objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Numbers and booleans (as 0/1). Strings are not considered.
pub fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// [`scalar_number`], or a string holding a number (surrounding whitespace
/// allowed).
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => scalar_number(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        let falsy_values = [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ];
        for falsy in falsy_values {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_scalar_number_counts_booleans() {
        assert_eq!(scalar_number(&json!(true)), Some(1.0));
        assert_eq!(scalar_number(&json!(false)), Some(0.0));
        assert_eq!(scalar_number(&json!(7)), Some(7.0));
        assert_eq!(scalar_number(&json!("7")), None);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(" 5.25 ")), Some(5.25));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!("n/a")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!([1.0])), None);
    }
}
