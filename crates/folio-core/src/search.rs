//! Case-insensitive substring matching over serialized entities.

use serde_json::Value;

/// Lowercased needle, or `None` when the query is blank (match everything).
pub(crate) fn needle(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// True when `value` matches the lowercased `needle`.
///
/// With `fields`, only those properties are considered; otherwise the whole
/// entity is matched through its compact JSON form.
pub(crate) fn matches(value: &Value, needle: &str, fields: Option<&[&str]>) -> bool {
    match fields {
        Some(fields) => fields.iter().any(|field| {
            value
                .get(*field)
                .and_then(stringify)
                .is_some_and(|s| s.to_lowercase().contains(needle))
        }),
        None => value.to_string().to_lowercase().contains(needle),
    }
}

/// Case-insensitive text equality (Unicode lowercase on both sides).
pub(crate) fn same_text(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// String form of one property. `null` has none and never matches.
pub(crate) fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| stringify(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
