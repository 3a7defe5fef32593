//! The patcher and its operation executors.

use serde_json::Value;

use crate::config::PatcherConfig;
use crate::handlers::{AbortCallback, ChangeCallback, HandlerTable, PropertyChange, PropertySelector};
use crate::identity::Identity;
use crate::resolve::{resolve_property, PropertyDef};
use crate::tracker::ChangeTracker;
use crate::types::{OpKind, Operation, PatchCall, PatchError, ShapeError};

/// Applies layer patch operations to JSON objects.
///
/// A patcher is configured once and reused for many calls. Each call runs
/// its operations in order, then notifies change callbacks once per touched
/// top-level property with the final state.
///
/// # Example
///
/// ```
/// use layer_patch::{Operation, PatchCall, Patcher};
/// use serde_json::json;
///
/// let mut patcher = Patcher::default();
/// let mut object = json!({"hey": "ho", "outerSet": ["d"]});
/// patcher
///     .apply(PatchCall::new(&mut object).operations([
///         Operation::set("sub_object.sub\\.hey", json!("howdy")),
///         Operation::add("outerSet", json!("e")),
///     ]))
///     .unwrap();
/// assert_eq!(object, json!({
///     "hey": "ho",
///     "outerSet": ["d", "e"],
///     "sub_object": {"sub.hey": "howdy"}
/// }));
/// ```
#[derive(Default)]
pub struct Patcher {
    config: PatcherConfig,
    identity: Identity,
    change_callbacks: HandlerTable<ChangeCallback>,
    abort_callbacks: HandlerTable<AbortCallback>,
}

impl Patcher {
    pub fn new(config: PatcherConfig) -> Self {
        Patcher {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PatcherConfig {
        &self.config
    }

    /// Sets the lookup used to resolve operation ids to objects.
    pub fn with_object_lookup<F>(mut self, lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<Value> + Send + Sync + 'static,
    {
        self.identity.set_lookup(Box::new(lookup));
        self
    }

    /// Sets the factory that registers objects for ids the lookup misses.
    pub fn with_object_factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut(&str, &Value) -> Value + Send + Sync + 'static,
    {
        self.identity.set_factory(Box::new(factory));
        self
    }

    /// Replaces the default id matcher ([`crate::identity::matches_id_field`]).
    pub fn with_id_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&str, &Value) -> bool + Send + Sync + 'static,
    {
        self.identity.set_matcher(Box::new(matcher));
        self
    }

    /// Replaces how an object's identifier is read for change snapshots
    /// (default [`crate::identity::extract_id_field`]).
    pub fn with_id_extractor<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.identity.set_extractor(Box::new(extractor));
        self
    }

    /// Registers a change callback for `kind`.
    pub fn on_change<F>(&mut self, kind: impl Into<String>, selector: PropertySelector, listener: F)
    where
        F: FnMut(PropertyChange<'_>) + Send + Sync + 'static,
    {
        self.change_callbacks.insert(kind, selector, Box::new(listener));
    }

    /// Registers a guard for `kind`. A guard returning `true` vetoes the
    /// operation it is asked about.
    pub fn on_abort<F>(&mut self, kind: impl Into<String>, selector: PropertySelector, guard: F)
    where
        F: FnMut(&str, OpKind, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.abort_callbacks.insert(kind, selector, Box::new(guard));
    }

    /// Applies a call.
    ///
    /// On error the remaining operations are skipped, earlier ones stay
    /// applied and no change callback fires.
    pub fn apply(&mut self, call: PatchCall<'_>) -> Result<(), PatchError> {
        self.apply_to(call.object, call.kind.as_deref(), &call.operations)
    }

    /// Applies `operations` to `object` as one call of the given kind.
    pub fn apply_to(
        &mut self,
        object: &mut Value,
        kind: Option<&str>,
        operations: &[Operation],
    ) -> Result<(), PatchError> {
        let mut tracker = ChangeTracker::new();
        for op in operations {
            self.apply_op(object, kind, op, &mut tracker)?;
        }
        tracker.dispatch(object, kind, &mut self.change_callbacks);
        Ok(())
    }

    fn apply_op(
        &mut self,
        object: &mut Value,
        kind: Option<&str>,
        op: &Operation,
        tracker: &mut ChangeTracker,
    ) -> Result<(), PatchError> {
        tracing::trace!(op = op.kind.as_str(), path = %op.path, "applying operation");
        let def = resolve_property(
            object,
            op,
            kind,
            &self.config,
            &self.identity,
            tracker,
            &mut self.abort_callbacks,
        )?;
        let value = self.identity.resolve(op, self.config.return_ids)?;
        let id = op.identifier();
        match op.kind {
            OpKind::Set => set_prop(def, value),
            OpKind::Delete => delete_prop(def, value),
            OpKind::Add => add_prop(def, value, id, &self.identity),
            OpKind::Remove => remove_prop(def, value, id, &self.identity),
        }
    }
}

// ── Operation executors ───────────────────────────────────────────────────

fn vetoed(def: &mut PropertyDef<'_>, kind: OpKind, value: Option<&Value>) -> bool {
    let Some(guard) = def.guard.as_mut() else {
        return false;
    };
    let veto = guard(&def.full_path, kind, value);
    if veto {
        tracing::debug!(
            op = kind.as_str(),
            path = %def.full_path,
            property = %def.base_name,
            "operation vetoed"
        );
    }
    veto
}

fn set_prop(mut def: PropertyDef<'_>, value: Option<Value>) -> Result<(), PatchError> {
    if vetoed(&mut def, OpKind::Set, value.as_ref()) {
        return Ok(());
    }
    def.container
        .insert(def.last_name, value.unwrap_or(Value::Null));
    Ok(())
}

fn delete_prop(mut def: PropertyDef<'_>, value: Option<Value>) -> Result<(), PatchError> {
    if vetoed(&mut def, OpKind::Delete, value.as_ref()) {
        return Ok(());
    }
    def.container.shift_remove(&def.last_name);
    Ok(())
}

/// Set membership for scalars. Numbers compare by value, so `1` and `1.0`
/// are the same member.
fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// The array at the targeted property, created empty when absent.
fn target_set<'d>(
    def: &'d mut PropertyDef<'_>,
    not_array: ShapeError,
) -> Result<&'d mut Vec<Value>, PatchError> {
    def.container
        .entry(def.last_name.clone())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or(PatchError::Shape(not_array))
}

fn add_prop(
    mut def: PropertyDef<'_>,
    value: Option<Value>,
    id: Option<&str>,
    identity: &Identity,
) -> Result<(), PatchError> {
    if vetoed(&mut def, OpKind::Add, value.as_ref()) {
        return Ok(());
    }
    let value = value.unwrap_or(Value::Null);
    let set = target_set(&mut def, ShapeError::AddTargetNotArray)?;
    if value.is_array() {
        return Err(ShapeError::AddArray.into());
    }
    match id {
        None => {
            if value.is_object() {
                return Err(ShapeError::AddObject.into());
            }
            if !set.iter().any(|element| scalar_eq(element, &value)) {
                set.push(value);
            }
        }
        Some(id) => {
            if !set.iter().any(|element| identity.matches(id, element)) {
                set.push(value);
            }
        }
    }
    Ok(())
}

fn remove_prop(
    mut def: PropertyDef<'_>,
    value: Option<Value>,
    id: Option<&str>,
    identity: &Identity,
) -> Result<(), PatchError> {
    if vetoed(&mut def, OpKind::Remove, value.as_ref()) {
        return Ok(());
    }
    let value = value.unwrap_or(Value::Null);
    let set = target_set(&mut def, ShapeError::RemoveTargetNotArray)?;
    let position = match id {
        None => {
            if value.is_array() {
                return Err(ShapeError::RemoveArray.into());
            }
            if value.is_object() {
                return Err(ShapeError::RemoveObject.into());
            }
            set.iter().position(|element| scalar_eq(element, &value))
        }
        Some(id) => set.iter().position(|element| identity.matches(id, element)),
    };
    if let Some(idx) = position {
        set.remove(idx);
    }
    Ok(())
}
