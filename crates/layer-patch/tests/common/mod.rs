#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use layer_patch::{OpKind, Patcher, PatcherConfig, PropertySelector};
use serde_json::{json, Value};

/// The nested object most matrices patch.
pub fn test_object() -> Value {
    json!({
        "hey": "ho",
        "outerSet": ["d"],
        "sub_object": {
            "subhey": "subho",
            "count": 5,
            "subber-object": {
                "count": 10,
                "set": ["a", "c", "z"]
            }
        }
    })
}

pub type ObjectCache = Arc<Mutex<HashMap<String, Value>>>;

/// Cache preloaded with `{"id": "a"}` and `{"id": "b"}`.
pub fn object_cache() -> ObjectCache {
    let mut cache = HashMap::new();
    cache.insert("a".to_string(), json!({"id": "a"}));
    cache.insert("b".to_string(), json!({"id": "b"}));
    Arc::new(Mutex::new(cache))
}

/// A patcher resolving ids through `cache` and registering new objects in it.
pub fn cached_patcher(config: PatcherConfig, cache: &ObjectCache) -> Patcher {
    let lookup = cache.clone();
    let factory = cache.clone();
    Patcher::new(config)
        .with_object_lookup(move |id| lookup.lock().unwrap().get(id).cloned())
        .with_object_factory(move |id, value| {
            factory
                .lock()
                .unwrap()
                .insert(id.to_string(), value.clone());
            value.clone()
        })
}

/// One change notification, owned.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub property: String,
    pub new_value: Option<Value>,
    pub old_value: Option<Value>,
    pub paths: Vec<String>,
}

pub type Notifications = Arc<Mutex<Vec<Notification>>>;

/// Records every notification for `kind` and `selector`.
pub fn record_changes(
    patcher: &mut Patcher,
    kind: &str,
    selector: PropertySelector,
) -> Notifications {
    let seen: Notifications = Arc::default();
    let log = seen.clone();
    patcher.on_change(kind, selector, move |change| {
        log.lock().unwrap().push(Notification {
            property: change.property.to_string(),
            new_value: change.new_value.cloned(),
            old_value: change.old_value.cloned(),
            paths: change.paths.to_vec(),
        });
    });
    seen
}

/// One guard consultation, owned.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardCall {
    pub path: String,
    pub op: OpKind,
    pub value: Option<Value>,
}

pub type GuardCalls = Arc<Mutex<Vec<GuardCall>>>;

/// Registers a guard that records its calls and answers `veto`.
pub fn record_guard(
    patcher: &mut Patcher,
    kind: &str,
    selector: PropertySelector,
    veto: bool,
) -> GuardCalls {
    let seen: GuardCalls = Arc::default();
    let log = seen.clone();
    patcher.on_abort(kind, selector, move |path, op, value| {
        log.lock().unwrap().push(GuardCall {
            path: path.to_string(),
            op,
            value: value.cloned(),
        });
        veto
    });
    seen
}
