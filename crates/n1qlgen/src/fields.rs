//! Field suggestions from a sample document.
//!
//! Paths are dotted (`address.city`). A non-empty array contributes a
//! `path[]` entry, and its first element stands in for the rest under the
//! prefix `path[0]`. Malformed or blank input yields empty results.

use serde_json::Value;
use std::collections::BTreeSet;

/// JSON type of a sampled field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Object,
    Array,
    Boolean,
    Number,
    String,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Object(_) => JsonKind::Object,
            Value::Array(_) => JsonKind::Array,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
        }
    }
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse(json: &str) -> Option<Value> {
    if json.trim().is_empty() {
        return None;
    }
    serde_json::from_str(json).ok()
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Sorted, de-duplicated field paths of `json`.
pub fn extract_field_paths(json: &str) -> Vec<String> {
    let mut paths = BTreeSet::new();
    if let Some(value) = parse(json) {
        collect_paths(&value, "", &mut paths);
    }
    paths.into_iter().collect()
}

fn collect_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = join_path(prefix, key);
                collect_paths(child, &path, out);
                out.insert(path);
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                out.insert(format!("{prefix}[]"));
                collect_paths(first, &format!("{prefix}[0]"), out);
            }
        }
        _ => {}
    }
}

/// Sorted, de-duplicated key names at any depth (no paths).
pub fn extract_field_names(json: &str) -> Vec<String> {
    let mut names = BTreeSet::new();
    if let Some(value) = parse(json) {
        collect_names(&value, &mut names);
    }
    names.into_iter().collect()
}

fn collect_names(value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                out.insert(key.clone());
                collect_names(child, out);
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                collect_names(first, out);
            }
        }
        _ => {}
    }
}

/// Field paths with their JSON type, in traversal order.
///
/// Object keys are visited in `serde_json`'s map order (sorted by key).
pub fn extract_fields_with_types(json: &str) -> Vec<(String, JsonKind)> {
    let mut fields = Vec::new();
    if let Some(value) = parse(json) {
        collect_typed(&value, "", &mut fields);
    }
    fields
}

fn collect_typed(value: &Value, prefix: &str, out: &mut Vec<(String, JsonKind)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = join_path(prefix, key);
                out.push((path.clone(), JsonKind::of(child)));
                if child.is_object() || child.is_array() {
                    collect_typed(child, &path, out);
                }
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                out.push((format!("{prefix}[]"), JsonKind::Array));
                collect_typed(first, &format!("{prefix}[0]"), out);
            }
        }
        _ => {}
    }
}

/// Whether `json` parses as a JSON document. Blank input is not valid.
pub fn is_valid_json(json: &str) -> bool {
    parse(json).is_some()
}

/// Pretty-print `json`; invalid input is returned unchanged.
pub fn pretty_json(json: &str) -> String {
    parse(json)
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| json.to_string())
}

/// Strip insignificant whitespace from `json`; invalid input is returned unchanged.
pub fn minify_json(json: &str) -> String {
    parse(json)
        .and_then(|v| serde_json::to_string(&v).ok())
        .unwrap_or_else(|| json.to_string())
}
