//! Property resolution: name transformation and path walking.

use layer_patch_path::{is_valid_index, normalize_property_path, parse_property_path};
use layer_patch_util::camel_case;
use serde_json::{Map, Value};

use crate::config::PatcherConfig;
use crate::handlers::{AbortCallback, HandlerTable};
use crate::identity::Identity;
use crate::tracker::ChangeTracker;
use crate::types::{Operation, PatchError};

/// An operation's target, resolved against one object.
pub(crate) struct PropertyDef<'a> {
    /// Object holding the targeted property.
    pub container: &'a mut Map<String, Value>,
    /// Name of the targeted property inside `container`.
    pub last_name: String,
    /// Transformed first segment.
    pub base_name: String,
    /// The requested path in normalized form.
    pub full_path: String,
    pub guard: Option<&'a mut AbortCallback>,
}

/// Effective name of a first path segment: camel-cased when enabled, then
/// renamed through the property name map of `kind`.
pub(crate) fn transform_base_name(config: &PatcherConfig, kind: Option<&str>, name: &str) -> String {
    let name = if config.camel_case {
        camel_case(name)
    } else {
        name.to_string()
    };
    match kind.and_then(|kind| config.mapped_name(kind, &name)) {
        Some(mapped) => mapped.to_string(),
        None => name,
    }
}

/// Walks `segments` from `root`, creating empty objects for missing keys.
///
/// Arrays on the way are entered by index. Anything else that is not an
/// object, including `null`, fails with an access error for `full_path`.
fn walk<'v>(
    root: &'v mut Value,
    segments: &[String],
    full_path: &str,
) -> Result<&'v mut Map<String, Value>, PatchError> {
    let mut current = root;
    for segment in segments {
        current = match current {
            Value::Object(map) => {
                if !map.contains_key(segment) {
                    tracing::trace!(segment = %segment, path = full_path, "creating missing object");
                }
                map.entry(segment.clone())
                    .or_insert_with(|| Value::Object(Map::new()))
            }
            Value::Array(arr) if is_valid_index(segment) => segment
                .parse::<usize>()
                .ok()
                .and_then(|idx| arr.get_mut(idx))
                .ok_or_else(|| PatchError::access(full_path))?,
            _ => return Err(PatchError::access(full_path)),
        };
        if !current.is_object() && !current.is_array() {
            return Err(PatchError::access(full_path));
        }
    }
    match current {
        Value::Object(map) => Ok(map),
        _ => Err(PatchError::access(full_path)),
    }
}

/// Resolves `op` against `object`.
///
/// The touch is recorded with `tracker` before anything is walked or
/// created, so a path that later fails or is vetoed is still tracked.
pub(crate) fn resolve_property<'a>(
    object: &'a mut Value,
    op: &Operation,
    kind: Option<&str>,
    config: &PatcherConfig,
    identity: &Identity,
    tracker: &mut ChangeTracker,
    guards: &'a mut HandlerTable<AbortCallback>,
) -> Result<PropertyDef<'a>, PatchError> {
    let full_path = normalize_property_path(&op.path);
    let mut segments = parse_property_path(&op.path);
    let base_name = transform_base_name(config, kind, &segments[0]);
    segments[0] = base_name.clone();

    tracker.touch(object, &base_name, &full_path, op, |value: &Value| {
        identity.identifier(value)
    });

    let (last_name, parents) = match segments.split_last_mut() {
        Some((last, parents)) => (std::mem::take(last), &*parents),
        None => return Err(PatchError::access(&full_path)),
    };
    let container = walk(object, parents, &full_path)?;
    let guard = match kind {
        Some(kind) => guards.lookup_mut(kind, &base_name),
        None => None,
    };

    Ok(PropertyDef {
        container,
        last_name,
        base_name,
        full_path,
        guard,
    })
}
