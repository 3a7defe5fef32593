use serde_json::Value;

/// Loose truthiness of a JSON value.
///
/// `null`, `false`, zero and the empty string are falsy; every array and
/// object is truthy, empty or not.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use layer_patch_util::is_truthy;
///
/// assert!(is_truthy(&json!({})));
/// assert!(is_truthy(&json!("0")));
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!("")));
/// ```
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
