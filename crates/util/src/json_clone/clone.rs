use serde_json::{Map, Value};

/// Prefix marking a key as private to the object that holds it.
pub const PRIVATE_KEY_PREFIX: char = '_';

/// Returns `true` when a key is excluded from snapshots.
///
/// # Examples
///
/// ```
/// use layer_patch_util::json_clone::is_redacted_key;
///
/// assert!(is_redacted_key("_internal"));
/// assert!(!is_redacted_key("sub_object"));
/// ```
pub fn is_redacted_key(key: &str) -> bool {
    key.starts_with(PRIVATE_KEY_PREFIX)
}

/// Creates a deep clone of a JSON value, leaving out private keys.
///
/// Objects nested inside arrays are redacted too. Scalars are copied as is.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use layer_patch_util::json_clone::redacted_clone;
///
/// let original = json!({"name": "a", "_cache": [1], "items": [{"_tmp": 1, "id": "x"}]});
/// assert_eq!(redacted_clone(&original), json!({"name": "a", "items": [{"id": "x"}]}));
/// ```
pub fn redacted_clone(value: &Value) -> Value {
    match value {
        Value::Array(arr) => Value::Array(arr.iter().map(redacted_clone).collect()),
        Value::Object(obj) => {
            let mut new_obj = Map::new();
            for (key, val) in obj {
                if is_redacted_key(key) {
                    continue;
                }
                new_obj.insert(key.clone(), redacted_clone(val));
            }
            Value::Object(new_obj)
        }
        scalar => scalar.clone(),
    }
}
