use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

/// Filters applied while loading a schema document.
///
/// Deserializable so it can sit under a `[schema]` table of a generator
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    /// Drop properties whose description marks them read-only.
    pub skip_read_only: bool,
    /// Model id to property names that are never emitted.
    pub blacklist: BTreeMap<String, BTreeSet<String>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_read_only: true,
            blacklist: BTreeMap::new(),
        }
    }
}

impl LoadOptions {
    /// Add a blacklisted property.
    pub fn with_blacklisted(mut self, model: impl Into<String>, property: impl Into<String>) -> Self {
        self.blacklist
            .entry(model.into())
            .or_default()
            .insert(property.into());
        self
    }

    pub fn is_blacklisted(&self, model: &str, property: &str) -> bool {
        self.blacklist
            .get(model)
            .is_some_and(|properties| properties.contains(property))
    }

    /// Whether a property with this description is dropped as read-only.
    pub fn skips(&self, description: &str) -> bool {
        self.skip_read_only && description.to_lowercase().contains("read-only")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::default();
        assert!(options.skip_read_only);
        assert!(options.blacklist.is_empty());
    }

    #[test]
    fn test_read_only_detection_ignores_case() {
        let options = LoadOptions::default();
        assert!(options.skips("Populated by the system. Read-only."));
        assert!(!options.skips("The name of the object."));

        let keep = LoadOptions {
            skip_read_only: false,
            ..LoadOptions::default()
        };
        assert!(!keep.skips("Read-only."));
    }

    #[test]
    fn test_blacklist() {
        let options = LoadOptions::default().with_blacklisted("v1beta1.Deployment", "status");
        assert!(options.is_blacklisted("v1beta1.Deployment", "status"));
        assert!(!options.is_blacklisted("v1beta1.Deployment", "spec"));
        assert!(!options.is_blacklisted("v1.Pod", "status"));
    }
}
