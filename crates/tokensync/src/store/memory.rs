//! In-memory variable store.

use serde::{Deserialize, Serialize};

use super::{
    Collection, CollectionId, Mode, ModeId, StoreError, Variable, VariableId, VariableKind,
    VariableStore, VariableValue,
};

/// Name given to the mode a new collection starts with.
pub const DEFAULT_MODE_NAME: &str = "Mode 1";

/// A [`VariableStore`] held entirely in memory.
///
/// Ids are allocated from one counter, so the same sequence of operations
/// always produces the same ids. The whole store serializes, which lets a
/// caller snapshot it between runs.
///
/// # Example
///
/// ```rust
/// use tokensync::store::{MemoryStore, VariableKind, VariableStore, VariableValue};
///
/// let mut store = MemoryStore::new();
/// let collection = store.create_collection("brand").unwrap();
/// let mode = collection.modes[0].id.clone();
///
/// let id = store.create_variable(&collection.id, "color/bg", VariableKind::Float).unwrap();
/// store.set_value(&id, &mode, VariableValue::Float(4.0)).unwrap();
///
/// assert_eq!(store.variable(&id).unwrap().values[&mode], VariableValue::Float(4.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    collections: Vec<Collection>,
    #[serde(default)]
    variables: Vec<Variable>,
    #[serde(default)]
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn collection_mut(&mut self, id: &CollectionId) -> Result<&mut Collection, StoreError> {
        self.collections
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| StoreError::UnknownCollection(id.clone()))
    }

    fn variable_ref(&self, id: &VariableId) -> Result<&Variable, StoreError> {
        self.variables
            .iter()
            .find(|v| v.id == *id)
            .ok_or_else(|| StoreError::UnknownVariable(id.clone()))
    }
}

impl VariableStore for MemoryStore {
    fn collections(&self) -> Vec<Collection> {
        self.collections.clone()
    }

    fn find_collection(&self, name: &str) -> Option<Collection> {
        self.collections.iter().find(|c| c.name == name).cloned()
    }

    fn create_collection(&mut self, name: &str) -> Result<Collection, StoreError> {
        let n = self.allocate();
        let collection = Collection {
            id: CollectionId::new(format!("VariableCollectionId:{}", n)),
            name: name.to_string(),
            modes: vec![Mode {
                id: ModeId::new(format!("{}:0", n)),
                name: DEFAULT_MODE_NAME.to_string(),
            }],
        };
        self.collections.push(collection.clone());
        Ok(collection)
    }

    fn create_mode(&mut self, collection: &CollectionId, name: &str) -> Result<ModeId, StoreError> {
        let n = self.allocate();
        let target = self.collection_mut(collection)?;
        let id = ModeId::new(format!("{}:{}", n, target.modes.len()));
        target.modes.push(Mode {
            id: id.clone(),
            name: name.to_string(),
        });
        Ok(id)
    }

    fn rename_mode(
        &mut self,
        collection: &CollectionId,
        mode: &ModeId,
        name: &str,
    ) -> Result<(), StoreError> {
        let target = self.collection_mut(collection)?;
        let entry = target
            .modes
            .iter_mut()
            .find(|m| m.id == *mode)
            .ok_or_else(|| StoreError::UnknownMode {
                collection: collection.clone(),
                mode: mode.clone(),
            })?;
        entry.name = name.to_string();
        Ok(())
    }

    fn variables(&self) -> Vec<Variable> {
        self.variables.clone()
    }

    fn variable(&self, id: &VariableId) -> Option<Variable> {
        self.variable_ref(id).ok().cloned()
    }

    fn find_variable(&self, collection: &CollectionId, name: &str) -> Option<Variable> {
        self.variables
            .iter()
            .find(|v| v.collection == *collection && v.name == name)
            .cloned()
    }

    fn create_variable(
        &mut self,
        collection: &CollectionId,
        name: &str,
        kind: VariableKind,
    ) -> Result<VariableId, StoreError> {
        self.collection_mut(collection)?;
        let n = self.allocate();
        let id = VariableId::new(format!("VariableID:{}", n));
        self.variables.push(Variable {
            id: id.clone(),
            name: name.to_string(),
            collection: collection.clone(),
            kind,
            values: Default::default(),
        });
        Ok(id)
    }

    fn set_value(
        &mut self,
        variable: &VariableId,
        mode: &ModeId,
        value: VariableValue,
    ) -> Result<(), StoreError> {
        let target = self.variable_ref(variable)?;
        let expected = target.kind;
        let found = match &value {
            VariableValue::Alias(other) => self.variable_ref(other)?.kind,
            literal => literal.kind().unwrap_or(expected),
        };
        if found != expected {
            return Err(StoreError::TypeMismatch {
                variable: variable.clone(),
                expected,
                found,
            });
        }

        let owner = target.collection.clone();
        let has_mode = self
            .collections
            .iter()
            .any(|c| c.id == owner && c.modes.iter().any(|m| m.id == *mode));
        if !has_mode {
            return Err(StoreError::UnknownMode {
                collection: owner,
                mode: mode.clone(),
            });
        }

        if let Some(entry) = self.variables.iter_mut().find(|v| v.id == *variable) {
            entry.values.insert(mode.clone(), value);
        }
        Ok(())
    }
}
