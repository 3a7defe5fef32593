//! Validation functions for property paths.

use thiserror::Error;

use crate::SENTINEL;

/// Maximum allowed property path string length.
const MAX_PROPERTY_PATH_LENGTH: usize = 1024;

/// Maximum allowed path depth.
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("PATH_EMPTY")]
    PathEmpty,
    #[error("PATH_TOO_LONG")]
    PathTooLong,
    #[error("PATH_RESERVED_CHAR")]
    ReservedChar,
    #[error("Path too deep")]
    PathTooDeep,
}

/// Validate a raw property path string.
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty
/// - The path exceeds the maximum length (1024 bytes)
/// - The path contains the reserved separator stand-in (U+0091)
///
/// # Example
///
/// ```
/// use layer_patch_path::validate_property_path;
///
/// validate_property_path("sub_object.count").unwrap();
/// validate_property_path("a\\.b").unwrap();
/// validate_property_path("").unwrap_err();
/// ```
pub fn validate_property_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::PathEmpty);
    }
    if path.len() > MAX_PROPERTY_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    if path.contains(SENTINEL) {
        return Err(ValidationError::ReservedChar);
    }
    Ok(())
}

/// Validate a parsed path (list of segments).
///
/// # Example
///
/// ```
/// use layer_patch_path::validate_path;
///
/// validate_path(&["a".to_string(), "b".to_string()]).unwrap();
/// validate_path(&(0..300).map(|i| i.to_string()).collect::<Vec<_>>()).unwrap_err();
/// ```
pub fn validate_path(path: &[String]) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::PathEmpty);
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooDeep);
    }
    Ok(())
}
