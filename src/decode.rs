//! Record and count extraction from response bodies
//!
//! List endpoints wrap their items in an envelope (`{"value": [...]}` by
//! convention); count endpoints return either a bare number or an envelope
//! with the count at a known field. Paths are dot-separated object keys,
//! optionally prefixed with `$.`.

use crate::error::{Error, Result};
use serde_json::Value;

/// Default path to the record array in a list response
pub const DEFAULT_RECORD_PATH: &str = "value";

/// Walk a dot-separated path into a JSON value
fn walk_path<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = body;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Extract the record array at `path` from a list response body.
///
/// An empty path means the body itself is the array.
pub fn extract_records(body: &Value, path: &str) -> Result<Vec<Value>> {
    let target = if path.is_empty() {
        Some(body)
    } else {
        walk_path(body, path)
    };

    match target {
        Some(Value::Array(records)) => Ok(records.clone()),
        Some(other) => Err(Error::record_extraction(
            path,
            format!("expected an array, found {}", type_name(other)),
        )),
        None => Err(Error::record_extraction(path, "path not found in response")),
    }
}

/// Extract a total count from a count response body.
///
/// With no path the body must be a bare non-negative number; with a path
/// the count is read from that field.
pub fn extract_count(body: &Value, path: Option<&str>) -> Result<u64> {
    let target = match path {
        None | Some("") => Some(body),
        Some(p) => walk_path(body, p),
    };

    target
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::count(format!("no count at '{}'", path.unwrap_or(""))))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
