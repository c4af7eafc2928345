//! Run settings.

use serde::{Deserialize, Serialize};

/// Settings that shape a synchronization run.
///
/// Every field has a default, so a settings file only lists what it changes:
///
/// ```rust
/// use tokensync::SyncSettings;
///
/// let settings: SyncSettings = serde_json::from_str(r#"{ "shouldCreate": false }"#).unwrap();
/// assert!(!settings.should_create);
/// assert!(settings.link_references);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncSettings {
    /// Allow creating missing collections, modes, and variables.
    ///
    /// When false the run only updates what already exists.
    pub should_create: bool,
    /// Rewrite aliased values into references to other variables.
    pub link_references: bool,
}

impl SyncSettings {
    /// Settings for an update-only run.
    pub fn update_only() -> Self {
        Self {
            should_create: false,
            ..Self::default()
        }
    }

    pub fn with_should_create(mut self, should_create: bool) -> Self {
        self.should_create = should_create;
        self
    }

    pub fn with_link_references(mut self, link_references: bool) -> Self {
        self.link_references = link_references;
        self
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            should_create: true,
            link_references: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert!(settings.should_create);
        assert!(settings.link_references);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings: SyncSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SyncSettings::default());
    }

    #[test]
    fn test_yaml_settings() {
        let settings: SyncSettings = serde_yaml::from_str("linkReferences: false\n").unwrap();
        assert!(settings.should_create);
        assert!(!settings.link_references);
    }

    #[test]
    fn test_update_only() {
        assert!(!SyncSettings::update_only().should_create);
    }
}
