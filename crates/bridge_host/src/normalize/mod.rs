//! Normalization of heterogeneous bridge payloads into canonical values.
//!
//! The bridge's response contract is not fixed across versions, so these functions pattern-match
//! speculatively instead of validating against a schema. None of them panic on malformed input;
//! every unusable payload maps to a typed [`crate::BridgeError`].

pub mod content;
pub mod folder;
pub mod listing;

use serde_json::Value;

/// Coerces an optional JSON value to a boolean using JavaScript truthiness.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::is_truthy;

    #[test]
    fn truthiness_matches_javascript_coercion() {
        let cases = [
            (json!(true), true),
            (json!(false), false),
            (json!(1), true),
            (json!(0), false),
            (json!(0.0), false),
            (json!("yes"), true),
            (json!(""), false),
            (json!(null), false),
            (json!([]), true),
            (json!({}), true),
        ];

        for (value, expected) in cases {
            assert_eq!(is_truthy(Some(&value)), expected, "value={value}");
        }
        assert!(!is_truthy(None));
    }
}
