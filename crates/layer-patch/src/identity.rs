//! Object identity collaborators.
//!
//! Operations that carry an `id` reference objects owned elsewhere. The
//! patcher asks a lookup for the object, optionally registers a new one
//! through a factory, and decides set membership with an id matcher.

use std::borrow::Cow;

use layer_patch_util::is_truthy;
use serde_json::Value;

use crate::types::{Operation, PatchError};

/// Resolves an identifier to an existing object.
pub type ObjectLookup = Box<dyn FnMut(&str) -> Option<Value> + Send + Sync>;

/// Registers and returns a new object for `(id, value)`.
pub type ObjectFactory = Box<dyn FnMut(&str, &Value) -> Value + Send + Sync>;

/// Decides whether a collection element is the object with a given id.
pub type IdMatcher = Box<dyn Fn(&str, &Value) -> bool + Send + Sync>;

/// Reads the identifier an object carries.
pub type IdExtractor = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Field holding an object's identifier.
pub const ID_FIELD: &str = "id";

fn id_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

/// Default id matcher: the element is an object whose `id` field equals `id`.
///
/// Numeric ids compare by their decimal text, so `{"id": 7}` matches `"7"`.
///
/// # Example
///
/// ```
/// use layer_patch::identity::matches_id_field;
/// use serde_json::json;
///
/// assert!(matches_id_field("b", &json!({"id": "b"})));
/// assert!(matches_id_field("7", &json!({"id": 7})));
/// assert!(!matches_id_field("b", &json!("b")));
/// ```
pub fn matches_id_field(id: &str, element: &Value) -> bool {
    element
        .get(ID_FIELD)
        .and_then(id_text)
        .is_some_and(|text| text == id)
}

/// The identifier carried by an object, if any.
pub fn identifier_of(value: &Value) -> Option<&Value> {
    value.get(ID_FIELD).filter(|id| !id.is_null())
}

/// Default extractor: the `id` field, unless it is `null`.
pub fn extract_id_field(value: &Value) -> Option<Value> {
    identifier_of(value).cloned()
}

pub(crate) struct Identity {
    lookup: Option<ObjectLookup>,
    factory: Option<ObjectFactory>,
    matcher: IdMatcher,
    extractor: IdExtractor,
}

impl Default for Identity {
    fn default() -> Self {
        Identity {
            lookup: None,
            factory: None,
            matcher: Box::new(matches_id_field),
            extractor: Box::new(extract_id_field),
        }
    }
}

impl Identity {
    pub(crate) fn set_lookup(&mut self, lookup: ObjectLookup) {
        self.lookup = Some(lookup);
    }

    pub(crate) fn set_factory(&mut self, factory: ObjectFactory) {
        self.factory = Some(factory);
    }

    pub(crate) fn set_matcher(&mut self, matcher: IdMatcher) {
        self.matcher = matcher;
    }

    pub(crate) fn set_extractor(&mut self, extractor: IdExtractor) {
        self.extractor = extractor;
    }

    pub(crate) fn matches(&self, id: &str, element: &Value) -> bool {
        (self.matcher)(id, element)
    }

    /// The identifier `value` carries, as read by the configured extractor.
    pub(crate) fn identifier(&self, value: &Value) -> Option<Value> {
        (self.extractor)(value)
    }

    /// The effective value of an operation.
    ///
    /// Without an id this is the inline value. With one, the lookup result
    /// wins; on a miss an inline value is registered through the factory
    /// (or used as is without one). Anything still unresolved becomes the
    /// raw id when `return_ids` is set and `null` otherwise.
    pub(crate) fn resolve(
        &mut self,
        op: &Operation,
        return_ids: bool,
    ) -> Result<Option<Value>, PatchError> {
        let Some(id) = op.identifier() else {
            return Ok(op.value.clone());
        };
        let lookup = self.lookup.as_mut().ok_or_else(|| {
            PatchError::Configuration(
                "Must provide an object lookup to use ids".to_string(),
            )
        })?;

        let mut result = lookup(id).filter(is_truthy);
        if result.is_none() {
            if let Some(value) = op.value.as_ref().filter(|v| is_truthy(v)) {
                let created = match self.factory.as_mut() {
                    Some(factory) => factory(id, value),
                    None => value.clone(),
                };
                result = Some(created).filter(is_truthy);
            }
        }

        Ok(Some(match result {
            Some(value) => value,
            None if return_ids => Value::String(id.to_string()),
            None => {
                tracing::debug!(id, path = %op.path, "identifier resolved to nothing");
                Value::Null
            }
        }))
    }
}
