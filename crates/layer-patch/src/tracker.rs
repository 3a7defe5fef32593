//! Per-call change tracking.
//!
//! Every operation touches one top-level ("base") property. The tracker
//! snapshots a base property the first time it is touched and collects the
//! distinct paths touched under it. Once the whole operation list has run,
//! [`ChangeTracker::dispatch`] sends one notification per base property.

use indexmap::IndexMap;
use layer_patch_util::{is_truthy, redacted_clone};
use serde_json::Value;

use crate::handlers::{ChangeCallback, HandlerTable, PropertyChange};
use crate::types::{OpKind, Operation};

/// Accumulated state of one base property during a call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRecord {
    /// Value before the first operation of the call touched the property.
    pub before: Option<Value>,
    /// Distinct full paths touched, in first-touch order.
    pub paths: Vec<String>,
}

/// Snapshot of a property's previous value.
///
/// Objects put in place by id (set or delete with an id) are recorded by
/// the identifier `identifier` reads from them. Everything else is cloned
/// with private keys redacted.
fn snapshot(
    previous: Option<&Value>,
    op: &Operation,
    identifier: impl Fn(&Value) -> Option<Value>,
) -> Option<Value> {
    let previous = previous?;
    let by_id = matches!(op.kind, OpKind::Set | OpKind::Delete) && op.identifier().is_some();
    if by_id && is_truthy(previous) {
        if let Some(id) = identifier(previous) {
            return Some(id);
        }
    }
    Some(redacted_clone(previous))
}

#[derive(Debug, Default)]
pub struct ChangeTracker {
    records: IndexMap<String, ChangeRecord>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `op` touches `full_path` under `base_name` of `object`.
    ///
    /// `full_path` is compared as given, so callers pass the normalized
    /// form. Must run before the operation mutates anything.
    pub fn touch(
        &mut self,
        object: &Value,
        base_name: &str,
        full_path: &str,
        op: &Operation,
        identifier: impl Fn(&Value) -> Option<Value>,
    ) {
        if !self.records.contains_key(base_name) {
            let before = snapshot(object.get(base_name), op, identifier);
            self.records.insert(
                base_name.to_string(),
                ChangeRecord {
                    before,
                    paths: Vec::new(),
                },
            );
        }
        if let Some(record) = self.records.get_mut(base_name) {
            if !record.paths.iter().any(|p| p == full_path) {
                record.paths.push(full_path.to_string());
            }
        }
    }

    pub fn get(&self, base_name: &str) -> Option<&ChangeRecord> {
        self.records.get(base_name)
    }

    /// Notifies the callbacks registered for `kind`, one call per touched
    /// base property, with the final state of `object`.
    pub fn dispatch(
        &self,
        object: &Value,
        kind: Option<&str>,
        callbacks: &mut HandlerTable<ChangeCallback>,
    ) {
        let Some(kind) = kind else {
            return;
        };
        if !callbacks.contains_kind(kind) {
            return;
        }
        for (property, record) in &self.records {
            let Some(callback) = callbacks.lookup_mut(kind, property) else {
                continue;
            };
            tracing::debug!(kind, property = %property, paths = ?record.paths, "dispatching change");
            callback(PropertyChange {
                object,
                property,
                new_value: object.get(property),
                old_value: record.before.as_ref(),
                paths: &record.paths,
            });
        }
    }
}
