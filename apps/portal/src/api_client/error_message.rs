//! Turns whatever a failed backend call left behind into one readable line.
//!
//! The backend speaks FastAPI, so failures arrive as `{"detail": ...}` where
//! `detail` is a string, a list of pydantic validation items, or an object.
//! Errors are modelled on the shape browsers see from an HTTP client:
//! `{"message": ..., "response": {"status": ..., "data": <body>}}`.

use serde_json::Value;

/// Normalizes an error value into a human-readable message.
///
/// Precedence: plain string, `response.data.detail`, top-level `detail`,
/// `message`, a bare `{type, loc, msg}` validation item, the JSON text of
/// the value, and finally `fallback`.
pub fn extract_error_message(error: &Value, fallback: &str) -> String {
    match error {
        Value::Null => return fallback.to_string(),
        Value::String(s) => return s.clone(),
        _ => {}
    }

    if let Some(detail) = error.pointer("/response/data/detail").filter(|d| truthy(d)) {
        return format_detail(detail);
    }

    if let Some(detail) = error.get("detail").filter(|d| truthy(d)) {
        return format_detail(detail);
    }

    if let Some(message) = error.get("message").filter(|m| truthy(m)) {
        return match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }

    if let (Some(_), Some(loc), Some(msg)) = (
        error.get("type").filter(|v| truthy(v)),
        error.get("loc").filter(|v| truthy(v)),
        error.get("msg").filter(|v| truthy(v)),
    ) {
        return format!("{}: {}", field_name(loc), text(msg));
    }

    serde_json::to_string(error).unwrap_or_else(|_| fallback.to_string())
}

fn format_detail(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_validation_item)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => {
            if let Some(msg) = map.get("msg").filter(|v| truthy(v)) {
                text(msg)
            } else if let Some(message) = map.get("message").filter(|v| truthy(v)) {
                text(message)
            } else {
                detail.to_string()
            }
        }
        other => other.to_string(),
    }
}

fn format_validation_item(item: &Value) -> String {
    if let Value::String(s) = item {
        return s.clone();
    }

    let loc = item.get("loc").filter(|v| truthy(v));
    let msg = item.get("msg").filter(|v| truthy(v));
    let kind = item.get("type").filter(|v| truthy(v));

    match (loc, msg, kind) {
        (Some(loc), Some(msg), _) => format!("{}: {}", field_name(loc), text(msg)),
        (None, Some(msg), _) => text(msg),
        (Some(loc), None, Some(kind)) => format!("{}: {}", field_name(loc), text(kind)),
        _ => item.to_string(),
    }
}

/// `loc` is a path like `["body", "email"]`; the last segment names the field.
fn field_name(loc: &Value) -> String {
    match loc {
        Value::Array(parts) => parts.last().map(text).unwrap_or_default(),
        other => text(other),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
