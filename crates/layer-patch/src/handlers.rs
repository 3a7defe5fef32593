//! Per-kind handler tables for guards and change callbacks.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::OpKind;

/// Veto hook consulted before a mutation: `(path, operation, value)`.
/// Returning `true` skips the mutation.
pub type AbortCallback = Box<dyn FnMut(&str, OpKind, Option<&Value>) -> bool + Send + Sync>;

/// Notification sent once per touched top-level property after a call.
pub type ChangeCallback = Box<dyn FnMut(PropertyChange<'_>) + Send + Sync>;

/// Net effect of one call on one top-level property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyChange<'a> {
    /// The patched object, in its final state.
    pub object: &'a Value,
    /// Top-level property name, after name transformation.
    pub property: &'a str,
    /// Current value of the property; `None` if it was deleted.
    pub new_value: Option<&'a Value>,
    /// Snapshot taken before the first operation touched the property.
    pub old_value: Option<&'a Value>,
    /// Every distinct path touched under the property, in first-touch order.
    pub paths: &'a [String],
}

/// Which properties of a kind a handler is registered for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertySelector {
    /// Every property. Shadows all named handlers of the same kind.
    All,
    /// One top-level property, by its transformed name.
    Property(String),
}

impl PropertySelector {
    pub fn property(name: impl Into<String>) -> Self {
        PropertySelector::Property(name.into())
    }
}

impl From<&str> for PropertySelector {
    fn from(name: &str) -> Self {
        PropertySelector::Property(name.to_string())
    }
}

impl From<String> for PropertySelector {
    fn from(name: String) -> Self {
        PropertySelector::Property(name)
    }
}

struct KindHandlers<H> {
    all: Option<H>,
    by_property: HashMap<String, H>,
}

impl<H> Default for KindHandlers<H> {
    fn default() -> Self {
        KindHandlers {
            all: None,
            by_property: HashMap::new(),
        }
    }
}

/// Two-level lookup: kind → property (or every property) → handler.
pub struct HandlerTable<H> {
    kinds: HashMap<String, KindHandlers<H>>,
}

impl<H> Default for HandlerTable<H> {
    fn default() -> Self {
        HandlerTable {
            kinds: HashMap::new(),
        }
    }
}

impl<H> HandlerTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler, returning the one it replaces.
    pub fn insert(
        &mut self,
        kind: impl Into<String>,
        selector: PropertySelector,
        handler: H,
    ) -> Option<H> {
        let handlers = self.kinds.entry(kind.into()).or_default();
        match selector {
            PropertySelector::All => handlers.all.replace(handler),
            PropertySelector::Property(name) => handlers.by_property.insert(name, handler),
        }
    }

    /// Handler for `property` of `kind`. A registered [`PropertySelector::All`]
    /// handler wins outright; named handlers are not consulted.
    pub fn lookup_mut(&mut self, kind: &str, property: &str) -> Option<&mut H> {
        let handlers = self.kinds.get_mut(kind)?;
        match handlers.all {
            Some(ref mut all) => Some(all),
            None => handlers.by_property.get_mut(property),
        }
    }

    pub fn contains_kind(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }
}
