//! JSON codec for layer patch operations.
//!
//! Operations travel as objects of the form
//! `{"operation": "set", "property": "a.b", "value": 1, "id": "x"}` where
//! `value` and `id` are optional.

use serde_json::{Map, Value};

use crate::types::{OpKind, Operation, PatchError};

fn decode_kind(v: Option<&Value>) -> Result<OpKind, PatchError> {
    let s = v
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("operation must be a string".into()))?;
    OpKind::from_str(s)
}

fn decode_property(v: Option<&Value>) -> Result<String, PatchError> {
    v.and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PatchError::InvalidOp("property must be a string".into()))
}

/// Ids may be strings or numbers; `null` means no id.
fn decode_id(v: Option<&Value>) -> Result<Option<String>, PatchError> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(PatchError::InvalidOp("id must be a string or number".into())),
    }
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Decode one operation.
pub fn from_json(v: &Value) -> Result<Operation, PatchError> {
    let map = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    Ok(Operation {
        kind: decode_kind(map.get("operation"))?,
        path: decode_property(map.get("property"))?,
        value: map.get("value").cloned(),
        id: decode_id(map.get("id"))?,
    })
}

/// Decode an array of operations.
pub fn from_json_ops(v: &Value) -> Result<Vec<Operation>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("operations must be an array".into()))?;
    arr.iter().map(from_json).collect()
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Encode one operation. Absent `value` and `id` are omitted.
pub fn to_json(op: &Operation) -> Value {
    let mut m = Map::new();
    m.insert("operation".into(), Value::String(op.kind.as_str().to_string()));
    m.insert("property".into(), Value::String(op.path.clone()));
    if let Some(value) = &op.value {
        m.insert("value".into(), value.clone());
    }
    if let Some(id) = &op.id {
        m.insert("id".into(), Value::String(id.clone()));
    }
    Value::Object(m)
}

pub fn to_json_ops(ops: &[Operation]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}
