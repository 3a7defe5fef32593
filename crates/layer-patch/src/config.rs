//! Static patcher configuration.
//!
//! Everything that is plain data lives here and can be loaded from any serde
//! format. Guards, change callbacks and object collaborators are closures and
//! are registered on [`crate::Patcher`] directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Plain-data options for a [`crate::Patcher`].
///
/// # Example
///
/// ```
/// use layer_patch::PatcherConfig;
///
/// let config: PatcherConfig = serde_json::from_str(r#"{
///     "camelCase": true,
///     "propertyNameMap": {"typea": {"a": "aaa"}}
/// }"#).unwrap();
/// assert!(config.camel_case);
/// assert_eq!(config.mapped_name("typea", "a"), Some("aaa"));
/// assert!(!config.return_ids);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatcherConfig {
    /// Convert `dashed-names` and `snake_names` in the first path segment
    /// to camel case.
    pub camel_case: bool,
    /// Per-kind renaming of the first path segment: kind → raw → mapped.
    pub property_name_map: HashMap<String, HashMap<String, String>>,
    /// Use the raw identifier as the value when an id resolves to nothing.
    #[serde(alias = "returnIdentifierOnMiss")]
    pub return_ids: bool,
}

impl PatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camel_case(mut self, enabled: bool) -> Self {
        self.camel_case = enabled;
        self
    }

    pub fn return_ids(mut self, enabled: bool) -> Self {
        self.return_ids = enabled;
        self
    }

    /// Maps `from` to `to` for objects of the given kind.
    pub fn map_property(
        mut self,
        kind: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.property_name_map
            .entry(kind.into())
            .or_default()
            .insert(from.into(), to.into());
        self
    }

    /// The mapped name for `name` under `kind`, if one is configured.
    pub fn mapped_name(&self, kind: &str, name: &str) -> Option<&str> {
        self.property_name_map
            .get(kind)?
            .get(name)
            .map(String::as_str)
            .filter(|mapped| !mapped.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let config: PatcherConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PatcherConfig::default());
    }

    #[test]
    fn builder_matches_deserialized() {
        let built = PatcherConfig::new()
            .camel_case(true)
            .return_ids(true)
            .map_property("typeb", "fred", "Ted");
        let parsed: PatcherConfig = serde_json::from_str(
            r#"{"camelCase": true, "returnIds": true, "propertyNameMap": {"typeb": {"fred": "Ted"}}}"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn mapped_name_lookup() {
        let config = PatcherConfig::new().map_property("typea", "b", "BCE");
        assert_eq!(config.mapped_name("typea", "b"), Some("BCE"));
        assert_eq!(config.mapped_name("typea", "c"), None);
        assert_eq!(config.mapped_name("typeC", "b"), None);
    }

    #[test]
    fn empty_mapping_is_ignored() {
        let config = PatcherConfig::new().map_property("typea", "a", "");
        assert_eq!(config.mapped_name("typea", "a"), None);
    }
}
