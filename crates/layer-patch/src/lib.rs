//! layer-patch - applies layer patch operations to JSON objects.
//!
//! A layer patch is a list of operations (`set`, `delete`, `add`, `remove`)
//! addressed by dotted property paths. The [`Patcher`] walks each path,
//! creating missing objects on the way, consults per-kind guards that may
//! veto a mutation, and after the whole call notifies change callbacks once
//! per touched top-level property.
//!
//! # Example
//!
//! ```
//! use layer_patch::{Operation, PatchCall, Patcher, PatcherConfig, PropertySelector};
//! use serde_json::{json, Value};
//! use std::sync::{Arc, Mutex};
//!
//! let seen: Arc<Mutex<Vec<(String, Option<Value>)>>> = Arc::default();
//! let log = seen.clone();
//!
//! let mut patcher = Patcher::new(PatcherConfig::new().camel_case(true));
//! patcher.on_change("widget", PropertySelector::All, move |change| {
//!     log.lock()
//!         .unwrap()
//!         .push((change.property.to_string(), change.new_value.cloned()));
//! });
//!
//! let mut object = json!({"subObject": {"count": 5}});
//! patcher
//!     .apply(PatchCall::new(&mut object).kind("widget").operations([
//!         Operation::set("sub-object.count", json!(6)),
//!         Operation::set("sub_object.name", json!("x")),
//!     ]))
//!     .unwrap();
//!
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![("subObject".to_string(), Some(json!({"count": 6, "name": "x"})))]
//! );
//! ```

pub mod apply;
pub mod codec;
pub mod config;
pub mod handlers;
pub mod identity;
mod resolve;
pub mod tracker;
pub mod types;
pub mod validate;

pub use apply::Patcher;
pub use codec::json::{from_json, from_json_ops, to_json, to_json_ops};
pub use config::PatcherConfig;
pub use handlers::{AbortCallback, ChangeCallback, HandlerTable, PropertyChange, PropertySelector};
pub use tracker::{ChangeRecord, ChangeTracker};
pub use types::{OpKind, Operation, PatchCall, PatchError, ShapeError};
