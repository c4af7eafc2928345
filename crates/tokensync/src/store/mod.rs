//! The external variable store.
//!
//! Variables live in a three-level model owned by the host:
//!
//! - a [`Collection`] is addressed by name and owns a list of [`Mode`]s
//! - a [`Variable`] belongs to one collection and has a fixed [`VariableKind`]
//! - a variable holds one [`VariableValue`] per mode of its collection
//!
//! The sync engine only talks to the model through the [`VariableStore`]
//! trait. [`MemoryStore`] is a complete in-memory implementation.

mod color;
mod memory;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use color::{parse_color, Rgba};
pub use memory::{MemoryStore, DEFAULT_MODE_NAME};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Stable id of a variable collection.
    CollectionId
);
string_id!(
    /// Stable id of a mode within a collection.
    ModeId
);
string_id!(
    /// Stable id of a variable.
    VariableId
);

/// The value type a variable holds in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VariableKind {
    Color,
    Float,
    String,
    Boolean,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableKind::Color => "color",
            VariableKind::Float => "float",
            VariableKind::String => "string",
            VariableKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A variable's value in one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum VariableValue {
    Color(Rgba),
    Float(f64),
    String(String),
    Boolean(bool),
    /// A live reference to another variable.
    Alias(VariableId),
}

impl VariableValue {
    /// The kind of a literal value; `None` for aliases.
    pub fn kind(&self) -> Option<VariableKind> {
        match self {
            VariableValue::Color(_) => Some(VariableKind::Color),
            VariableValue::Float(_) => Some(VariableKind::Float),
            VariableValue::String(_) => Some(VariableKind::String),
            VariableValue::Boolean(_) => Some(VariableKind::Boolean),
            VariableValue::Alias(_) => None,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Color(rgba) => write!(f, "{}", rgba),
            VariableValue::Float(n) => write!(f, "{}", crate::token::format_number(*n)),
            VariableValue::String(s) => f.write_str(s),
            VariableValue::Boolean(b) => write!(f, "{}", b),
            VariableValue::Alias(id) => write!(f, "-> {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub id: ModeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub modes: Vec<Mode>,
}

impl Collection {
    pub fn mode(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    /// Slash-separated name (`color/bg`).
    pub name: String,
    pub collection: CollectionId,
    pub kind: VariableKind,
    #[serde(default)]
    pub values: BTreeMap<ModeId, VariableValue>,
}

/// Error returned by variable store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("variable store is unavailable: {0}")]
    HostUnavailable(String),
    #[error("unknown collection '{0}'")]
    UnknownCollection(CollectionId),
    #[error("collection '{collection}' has no mode '{mode}'")]
    UnknownMode {
        collection: CollectionId,
        mode: ModeId,
    },
    #[error("unknown variable '{0}'")]
    UnknownVariable(VariableId),
    #[error("variable '{variable}' holds {expected} values, got {found}")]
    TypeMismatch {
        variable: VariableId,
        expected: VariableKind,
        found: VariableKind,
    },
}

/// Capability interface over the host's variable storage.
///
/// Lookups are by name so that repeated runs find what earlier runs created.
/// Implementations never delete anything on behalf of the sync engine.
pub trait VariableStore {
    /// All collections, in creation order.
    fn collections(&self) -> Vec<Collection>;

    fn find_collection(&self, name: &str) -> Option<Collection> {
        self.collections().into_iter().find(|c| c.name == name)
    }

    /// Creates a collection with one default mode.
    fn create_collection(&mut self, name: &str) -> Result<Collection, StoreError>;

    fn create_mode(&mut self, collection: &CollectionId, name: &str) -> Result<ModeId, StoreError>;

    fn rename_mode(
        &mut self,
        collection: &CollectionId,
        mode: &ModeId,
        name: &str,
    ) -> Result<(), StoreError>;

    /// All variables, in creation order.
    fn variables(&self) -> Vec<Variable>;

    fn variable(&self, id: &VariableId) -> Option<Variable> {
        self.variables().into_iter().find(|v| v.id == *id)
    }

    fn find_variable(&self, collection: &CollectionId, name: &str) -> Option<Variable> {
        self.variables()
            .into_iter()
            .find(|v| v.collection == *collection && v.name == name)
    }

    fn create_variable(
        &mut self,
        collection: &CollectionId,
        name: &str,
        kind: VariableKind,
    ) -> Result<VariableId, StoreError>;

    /// Sets a variable's value for one mode.
    ///
    /// Literal values must match the variable's kind; aliases must point at
    /// an existing variable of the same kind.
    fn set_value(
        &mut self,
        variable: &VariableId,
        mode: &ModeId,
        value: VariableValue,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_value_kind() {
        assert_eq!(VariableValue::Float(1.0).kind(), Some(VariableKind::Float));
        assert_eq!(
            VariableValue::Alias(VariableId::new("VariableID:1")).kind(),
            None
        );
    }

    #[test]
    fn test_variable_value_serde_shape() {
        let json = serde_json::to_value(VariableValue::Float(8.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "float", "value": 8.0 }));

        let json = serde_json::to_value(VariableValue::Alias(VariableId::new("V:1"))).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "alias", "value": "V:1" }));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::TypeMismatch {
            variable: VariableId::new("V:1"),
            expected: VariableKind::Float,
            found: VariableKind::Color,
        };
        assert_eq!(
            err.to_string(),
            "variable 'V:1' holds float values, got color"
        );
    }
}
