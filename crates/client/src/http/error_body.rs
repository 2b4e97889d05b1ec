//! Error-body normalization
//!
//! The backend reports failures in several shapes: a bare array of field
//! errors, a nested `errors` array, a flat field-to-message map, a standard
//! `message` object, or an `error`/`message` pair. This module flattens all
//! of them into one human-readable string via an ordered chain of matchers;
//! the first non-empty result wins.
//!
//! The chain is a pure function over the body text so its precedence can be
//! tested without a network in the loop.

use serde_json::Value;

/// Keys skipped when rescanning a validation payload for field details.
const ENVELOPE_KEYS: [&str; 4] = ["message", "error", "status", "timestamp"];

/// Normalize a non-2xx response body into a message, if one can be found
///
/// Returns `None` for empty bodies and for JSON payloads none of the known
/// shapes match; the caller falls back to the HTTP status line.
pub fn extract_error_message(body: &str) -> Option<String> {
    let Ok(payload) = serde_json::from_str::<Value>(body) else {
        // Plain-text error bodies pass through as-is.
        let trimmed = body.trim();
        return if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
    };

    from_error_array(&payload)
        .or_else(|| from_errors_field(&payload))
        .or_else(|| from_field_map(&payload))
        .or_else(|| from_message(&payload))
}

/// Shape 1: a top-level array of error objects.
fn from_error_array(payload: &Value) -> Option<String> {
    join_error_entries(payload.as_array()?)
}

/// Shape 2: an object with a nested `errors` array.
fn from_errors_field(payload: &Value) -> Option<String> {
    join_error_entries(payload.as_object()?.get("errors")?.as_array()?)
}

/// Shape 3: a flat object mapping field names to messages
///
/// Only applies when the payload is not a standard error response, i.e. it
/// has neither a `message` nor an `error` key.
fn from_field_map(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;
    if object.contains_key("message") || object.contains_key("error") {
        return None;
    }

    let mut messages = Vec::new();
    for (field, value) in object {
        match value {
            Value::String(text) if !text.is_empty() => {
                messages.push(format!("{field}: {text}"));
            }
            Value::Array(entries) => {
                let texts: Vec<&str> =
                    entries.iter().filter_map(Value::as_str).filter(|t| !t.is_empty()).collect();
                if !texts.is_empty() {
                    messages.push(format!("{field}: {}", texts.join(", ")));
                }
            }
            _ => {}
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(", "))
    }
}

/// Shapes 4 and 5: a standard error response carrying a `message`
///
/// A generic "validation" message is replaced by the sibling fields' detail
/// strings when any exist; an `error` sibling upgrades the result to
/// `"error: message"`. The substring match on "validation" mirrors the
/// backend's current envelope and must be revisited if that contract moves.
fn from_message(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;
    let message = object.get("message")?.as_str()?;

    if message.to_lowercase().contains("validation") {
        let mut details = Vec::new();
        for (field, value) in object {
            if ENVELOPE_KEYS.contains(&field.as_str()) {
                continue;
            }
            match value {
                Value::String(text) if !text.is_empty() => details.push(text.clone()),
                Value::Array(entries) => {
                    details.extend(
                        entries
                            .iter()
                            .filter_map(Value::as_str)
                            .filter(|t| !t.is_empty())
                            .map(String::from),
                    );
                }
                _ => {}
            }
        }
        if !details.is_empty() {
            return Some(details.join(", "));
        }
    }

    match object.get("error").and_then(Value::as_str) {
        Some(error) => Some(format!("{error}: {message}")),
        None => Some(message.to_string()),
    }
}

/// Join an array of error entries (strings or `{field, message,
/// defaultMessage}` objects) with `", "`.
fn join_error_entries(entries: &[Value]) -> Option<String> {
    let messages: Vec<String> = entries.iter().filter_map(entry_message).collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(", "))
    }
}

fn entry_message(entry: &Value) -> Option<String> {
    match entry {
        Value::String(text) => Some(text.clone()),
        Value::Object(object) => {
            let message = object
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| object.get("defaultMessage").and_then(Value::as_str))?;
            match object.get("field").and_then(Value::as_str) {
                Some(field) => Some(format!("{field}: {message}")),
                None => Some(message.to_string()),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_of_field_errors_joins_with_field_prefix() {
        let body = r#"[{"field":"name","defaultMessage":"must not be blank"}]"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("name: must not be blank"));
    }

    #[test]
    fn array_prefers_message_over_default_message() {
        let body = r#"[{"message":"too long"},{"defaultMessage":"too short"}]"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("too long, too short"));
    }

    #[test]
    fn array_of_bare_strings_passes_through() {
        let body = r#"["first problem","second problem"]"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("first problem, second problem"));
    }

    #[test]
    fn nested_errors_array_joins_like_top_level() {
        let body = r#"{"errors":[{"field":"email","defaultMessage":"invalid format"}]}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("email: invalid format"));
    }

    #[test]
    fn flat_field_map_joins_key_value_pairs() {
        let body = r#"{"brand":"must not be blank","images":["at least one required"]}"#;
        let message = extract_error_message(body).unwrap();
        // Object key order is not preserved, so assert on both pairs.
        assert!(message.contains("brand: must not be blank"));
        assert!(message.contains("images: at least one required"));
    }

    #[test]
    fn field_map_skipped_when_message_key_present() {
        let body = r#"{"message":"boom","brand":"ignored"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("boom"));
    }

    #[test]
    fn generic_validation_message_replaced_by_sibling_details() {
        let body = r#"{"message":"Validation failed","name":"must not be blank"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("must not be blank"));
    }

    #[test]
    fn validation_rescan_skips_envelope_keys() {
        let body = r#"{"message":"Validation failed","status":"400","timestamp":"2026-01-01T00:00:00Z"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Validation failed"));
    }

    #[test]
    fn validation_match_is_case_insensitive() {
        let body = r#"{"message":"VALIDATION error on input","name":"required"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("required"));
    }

    #[test]
    fn error_and_message_pair_joins_with_colon() {
        let body = r#"{"error":"Bad Request","message":"brand missing"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Bad Request: brand missing"));
    }

    #[test]
    fn plain_message_used_as_is() {
        let body = r#"{"message":"Phone not found"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Phone not found"));
    }

    #[test]
    fn plain_text_body_passes_through() {
        assert_eq!(extract_error_message("service unavailable").as_deref(), Some("service unavailable"));
    }

    #[test]
    fn empty_body_yields_none() {
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message("   "), None);
    }

    #[test]
    fn unrecognized_json_shape_yields_none() {
        assert_eq!(extract_error_message(r#"{"error":"alone"}"#), None);
        assert_eq!(extract_error_message("42"), None);
    }

    #[test]
    fn empty_errors_array_falls_through_to_message() {
        let body = r#"{"errors":[],"message":"still broken"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("still broken"));
    }
}
