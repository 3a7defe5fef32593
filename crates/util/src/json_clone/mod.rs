//! JSON cloning utilities.
//!
//! Snapshots taken before a patch is applied go through [`redacted_clone`],
//! which drops private keys (names starting with `_`) at every depth.

mod clone;

pub use clone::{is_redacted_key, redacted_clone};
