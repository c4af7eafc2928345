//! Theme descriptors.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a theme uses one of its token sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSetStatus {
    /// Tokens are resolved and materialized.
    Enabled,
    /// The set is ignored.
    Disabled,
    /// Tokens can be referenced but are not materialized.
    Source,
}

/// One entry of a theme's set selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSet {
    pub name: String,
    pub status: TokenSetStatus,
}

/// A theme's ordered set selection.
///
/// Serialized as a map of set name to status; document order is the
/// precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectedSets(Vec<SelectedSet>);

impl SelectedSets {
    /// Sets the status of a set, appending it if not yet selected.
    pub fn set(&mut self, name: impl Into<String>, status: TokenSetStatus) {
        let name = name.into();
        match self.0.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.status = status,
            None => self.0.push(SelectedSet { name, status }),
        }
    }

    pub fn status(&self, name: &str) -> Option<TokenSetStatus> {
        self.0.iter().find(|s| s.name == name).map(|s| s.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedSet> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SelectedSets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for selected in &self.0 {
            map.serialize_entry(&selected.name, &selected.status)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SelectedSets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SelectionVisitor;

        impl<'de> Visitor<'de> for SelectionVisitor {
            type Value = SelectedSets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of token set name to status")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SelectedSets, A::Error> {
                let mut sets = SelectedSets::default();
                while let Some((name, status)) = map.next_entry::<String, TokenSetStatus>()? {
                    sets.set(name, status);
                }
                Ok(sets)
            }
        }

        deserializer.deserialize_map(SelectionVisitor)
    }
}

/// A named selection of token sets, mapped to one collection and mode.
///
/// # Example
///
/// ```rust
/// use tokensync::ThemeDescriptor;
///
/// let dark = ThemeDescriptor::new("t-dark", "dark")
///     .with_group("color-scheme")
///     .enable("global")
///     .enable("dark")
///     .source("palette");
///
/// assert_eq!(dark.collection_name(), "color-scheme");
/// assert_eq!(dark.mode_name(), "dark");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub selected_token_sets: SelectedSets,
}

impl ThemeDescriptor {
    /// Creates a theme with no group and no selected sets.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: None,
            selected_token_sets: SelectedSets::default(),
        }
    }

    /// Sets the group, returning the updated theme for chaining.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Selects a set as enabled, returning the updated theme for chaining.
    pub fn enable(self, set: impl Into<String>) -> Self {
        self.select(set, TokenSetStatus::Enabled)
    }

    /// Selects a set as disabled, returning the updated theme for chaining.
    pub fn disable(self, set: impl Into<String>) -> Self {
        self.select(set, TokenSetStatus::Disabled)
    }

    /// Selects a set as reference-only, returning the updated theme for chaining.
    pub fn source(self, set: impl Into<String>) -> Self {
        self.select(set, TokenSetStatus::Source)
    }

    pub fn select(mut self, set: impl Into<String>, status: TokenSetStatus) -> Self {
        self.selected_token_sets.set(set, status);
        self
    }

    /// Name of the target collection: the group, or the theme name if ungrouped.
    pub fn collection_name(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.name)
    }

    /// Name of the target mode within the collection.
    pub fn mode_name(&self) -> &str {
        &self.name
    }
}
