//! Core types: operations, calls and errors.

use serde_json::Value;
use thiserror::Error;

use crate::codec::json::from_json_ops;

// ── Error ─────────────────────────────────────────────────────────────────

/// A collection operation met a value or target of the wrong shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("The add operation requires an array or new structure to add to.")]
    AddTargetNotArray,
    #[error("The add operation will not add arrays to sets.")]
    AddArray,
    #[error("The add operation will not add objects to sets.")]
    AddObject,
    #[error("The remove operation requires an array or new structure to remove from.")]
    RemoveTargetNotArray,
    #[error("The remove operation will not remove arrays from sets.")]
    RemoveArray,
    #[error("The remove operation will not remove objects from sets.")]
    RemoveObject,
}

/// Errors raised out of [`crate::Patcher::apply`].
///
/// Every variant aborts the remaining operations of the call. Operations
/// applied before the failure stay applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A path walked through a value that is not an object.
    #[error("Can not access property '{path}'")]
    Access { path: String },
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// The patcher is missing a collaborator the operation needs.
    #[error("{0}")]
    Configuration(String),
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

impl PatchError {
    pub(crate) fn access(path: &str) -> Self {
        PatchError::Access {
            path: path.to_string(),
        }
    }
}

// ── Operation kind ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Assign a value to a property.
    Set,
    /// Remove a property from its object.
    Delete,
    /// Add a member to a set-like array.
    Add,
    /// Remove a member from a set-like array.
    Remove,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Set => "set",
            OpKind::Delete => "delete",
            OpKind::Add => "add",
            OpKind::Remove => "remove",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, PatchError> {
        match s {
            "set" => Ok(OpKind::Set),
            "delete" => Ok(OpKind::Delete),
            "add" => Ok(OpKind::Add),
            "remove" => Ok(OpKind::Remove),
            other => Err(PatchError::InvalidOp(format!("unknown operation: {other}"))),
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Operation ─────────────────────────────────────────────────────────────

/// One mutation addressed by a dotted property path.
///
/// When `id` is set the effective value is looked up through the patcher's
/// object lookup instead of being taken from `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OpKind,
    pub path: String,
    pub value: Option<Value>,
    pub id: Option<String>,
}

impl Operation {
    pub fn new(kind: OpKind, path: impl Into<String>) -> Self {
        Operation {
            kind,
            path: path.into(),
            value: None,
            id: None,
        }
    }

    pub fn set(path: impl Into<String>, value: Value) -> Self {
        Operation::new(OpKind::Set, path).with_value(value)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Operation::new(OpKind::Delete, path)
    }

    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Operation::new(OpKind::Add, path).with_value(value)
    }

    pub fn remove(path: impl Into<String>, value: Value) -> Self {
        Operation::new(OpKind::Remove, path).with_value(value)
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The identifier, if the operation references one. Empty ids do not count.
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

// ── Call ──────────────────────────────────────────────────────────────────

/// One `apply` invocation: the target object, its kind and the operations.
///
/// The kind selects guards, name maps and change callbacks. Without a kind
/// no guard runs and no change callback fires.
#[derive(Debug)]
pub struct PatchCall<'a> {
    pub object: &'a mut Value,
    pub kind: Option<String>,
    pub operations: Vec<Operation>,
}

impl<'a> PatchCall<'a> {
    pub fn new(object: &'a mut Value) -> Self {
        PatchCall {
            object,
            kind: None,
            operations: Vec::new(),
        }
    }

    /// Builds a call from operations in their JSON form.
    pub fn from_json(
        object: &'a mut Value,
        kind: Option<&str>,
        operations: &Value,
    ) -> Result<Self, PatchError> {
        Ok(PatchCall {
            object,
            kind: kind.map(str::to_string),
            operations: from_json_ops(operations)?,
        })
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(operations);
        self
    }
}
