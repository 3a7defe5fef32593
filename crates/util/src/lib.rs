//! layer-patch-util - Value helpers for layer-patch
//!
//! This crate provides the small, dependency-free helpers the patch engine
//! builds on: snapshot cloning with private-key redaction, loose truthiness
//! and first-segment name casing.

pub mod json_clone;
pub mod strings;
pub mod truthy;

// Re-exports for convenience
pub use json_clone::{is_redacted_key, redacted_clone};
pub use strings::camel_case;
pub use truthy::is_truthy;
