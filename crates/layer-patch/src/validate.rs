//! Layer patch operation validator.
//!
//! Checks operations in their raw JSON form, before decoding, so untrusted
//! input can be rejected early with a precise reason.

use layer_patch_path::{parse_property_path, validate_path, validate_property_path};
use serde_json::{Map, Value};
use thiserror::Error;

// ── Error ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn err(msg: &str) -> ValidationError {
    ValidationError(msg.to_string())
}

// ── Public API ─────────────────────────────────────────────────────────────

/// Validate a list of operations. An empty list is valid.
///
/// Errors include the index of the failing operation:
/// `"Error in operation [index = N] (reason)."`.
///
/// # Example
///
/// ```
/// use layer_patch::validate::validate_operations;
/// use serde_json::json;
///
/// validate_operations(&json!([{"operation": "delete", "property": "hey"}])).unwrap();
/// let err = validate_operations(&json!([
///     {"operation": "delete", "property": "hey"},
///     {"operation": "add", "property": "set", "value": [1]},
/// ]))
/// .unwrap_err();
/// assert_eq!(err.0, "Error in operation [index = 1] (OP_VALUE_NOT_SCALAR).");
/// ```
pub fn validate_operations(ops: &Value) -> Result<(), ValidationError> {
    let arr = ops.as_array().ok_or_else(|| err("Not an array."))?;
    for (i, op) in arr.iter().enumerate() {
        validate_operation(op).map_err(|e| {
            ValidationError(format!("Error in operation [index = {}] ({}).", i, e.0))
        })?;
    }
    Ok(())
}

/// Validate a single operation object.
pub fn validate_operation(op: &Value) -> Result<(), ValidationError> {
    let map = op.as_object().ok_or_else(|| err("OP_INVALID"))?;

    let property = map
        .get("property")
        .and_then(Value::as_str)
        .ok_or_else(|| err("OP_PROPERTY_INVALID"))?;
    validate_property_path(property).map_err(|_| err("OP_PROPERTY_INVALID"))?;
    validate_path(&parse_property_path(property)).map_err(|_| err("OP_PROPERTY_INVALID"))?;

    let has_id = validate_id(map)?;
    match map.get("operation").and_then(Value::as_str) {
        Some("set") => validate_value_present(map, has_id),
        Some("delete") => Ok(()),
        Some("add") | Some("remove") => {
            validate_value_present(map, has_id)?;
            validate_set_member(map, has_id)
        }
        _ => Err(err("OP_UNKNOWN")),
    }
}

// ── Field checks ───────────────────────────────────────────────────────────

/// Returns whether the operation carries a usable id.
fn validate_id(map: &Map<String, Value>) -> Result<bool, ValidationError> {
    match map.get("id") {
        None | Some(Value::Null) => Ok(false),
        Some(Value::String(s)) => Ok(!s.is_empty()),
        Some(Value::Number(_)) => Ok(true),
        Some(_) => Err(err("OP_ID_INVALID")),
    }
}

fn validate_value_present(map: &Map<String, Value>, has_id: bool) -> Result<(), ValidationError> {
    if has_id || map.contains_key("value") {
        Ok(())
    } else {
        Err(err("OP_VALUE_MISSING"))
    }
}

/// Without an id only scalars can be set members.
fn validate_set_member(map: &Map<String, Value>, has_id: bool) -> Result<(), ValidationError> {
    match map.get("value") {
        Some(Value::Array(_)) => Err(err("OP_VALUE_NOT_SCALAR")),
        Some(Value::Object(_)) if !has_id => Err(err("OP_VALUE_NOT_SCALAR")),
        _ => Ok(()),
    }
}
