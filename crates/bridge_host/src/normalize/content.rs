//! File-content response normalization.

use serde_json::Value;

use crate::error::BridgeError;

/// Extracts displayable text from a file-read response.
///
/// A bare string is the content; otherwise the `content` then `data` string fields are probed;
/// any other object or array is pretty-printed as JSON.
///
/// # Errors
///
/// Returns [`BridgeError::UnreadableContent`] for `null`, booleans, and numbers.
pub fn normalize_file_content(payload: &Value) -> Result<String, BridgeError> {
    if let Value::String(text) = payload {
        return Ok(text.clone());
    }

    if let Some(text) = ["content", "data"]
        .iter()
        .find_map(|field| payload.get(field).and_then(Value::as_str))
    {
        return Ok(text.to_string());
    }

    match payload {
        Value::Array(_) | Value::Object(_) => serde_json::to_string_pretty(payload)
            .map_err(|err| BridgeError::UnexpectedException(err.to_string())),
        _ => Err(BridgeError::UnreadableContent),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn content_prefers_bare_string_then_fields() {
        assert_eq!(normalize_file_content(&json!("hello")).as_deref(), Ok("hello"));
        assert_eq!(normalize_file_content(&json!("")).as_deref(), Ok(""));
        assert_eq!(
            normalize_file_content(&json!({"content": "c", "data": "d"})).as_deref(),
            Ok("c")
        );
        assert_eq!(
            normalize_file_content(&json!({"content": 3, "data": "d"})).as_deref(),
            Ok("d")
        );
    }

    #[test]
    fn composite_payloads_are_pretty_printed() {
        let text = normalize_file_content(&json!({"size": 3})).expect("content");
        assert_eq!(text, "{\n  \"size\": 3\n}");
        assert_eq!(normalize_file_content(&json!([1])).expect("content"), "[\n  1\n]");
    }

    #[test]
    fn scalar_payloads_are_unreadable() {
        for payload in [json!(null), json!(true), json!(42)] {
            assert_eq!(
                normalize_file_content(&payload),
                Err(BridgeError::UnreadableContent),
                "payload={payload}"
            );
        }
    }
}
