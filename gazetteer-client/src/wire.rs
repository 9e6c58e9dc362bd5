//! Wire error-body parsing
//!
//! The save endpoint reports validation failures as a JSON object keyed by
//! dotted/bracket field paths (`lpis[0].postcode`), each mapping to one
//! message or an array of messages. Other failure bodies are reduced to a
//! title/description pair on a best-effort basis.

use gazetteer_core::{FieldError, SubEntity};
use serde_json::Value;

/// Parse a 400 response body into field errors.
///
/// Paths that cannot be attributed to a known sub-entity are kept under the
/// BLPU group with the full path as the field, so no message is lost.
pub fn parse_field_errors(body: &str) -> Vec<FieldError> {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    for (path, value) in &map {
        let messages: Vec<String> = match value {
            Value::String(message) => vec![message.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => continue,
        };
        let (sub_entity, index, field) = parse_error_path(path);
        for message in messages {
            errors.push(FieldError {
                sub_entity,
                index,
                field: field.clone(),
                message,
            });
        }
    }
    errors
}

/// Split `lpis[0].postcode` into (sub-entity, collection index, field).
fn parse_error_path(path: &str) -> (SubEntity, Option<usize>, String) {
    let (prefix, field) = match path.split_once('.') {
        Some((prefix, field)) => (prefix, field.to_string()),
        None => (path, String::new()),
    };

    let (name, index) = match prefix.split_once('[') {
        Some((name, rest)) => {
            let index = rest
                .strip_suffix(']')
                .and_then(|digits| digits.parse::<usize>().ok());
            (name, index)
        }
        None => (prefix, None),
    };

    match name.parse::<SubEntity>() {
        Ok(sub_entity) => (sub_entity, index, field),
        Err(_) => (SubEntity::Blpu, None, path.to_string()),
    }
}

/// Best-effort reduction of a non-validation error body to a title and
/// description. Accepts a JSON `{title, description}` object, falling back
/// to the raw text.
pub fn parse_error_body(status: u16, body: &str) -> (String, String) {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        let title = map
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Server error");
        let description = map
            .get("description")
            .or_else(|| map.get("detail"))
            .and_then(Value::as_str)
            .unwrap_or(body);
        return (title.to_string(), description.to_string());
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        (format!("HTTP {}", status), "No further detail".to_string())
    } else {
        (format!("HTTP {}", status), trimmed.to_string())
    }
}
