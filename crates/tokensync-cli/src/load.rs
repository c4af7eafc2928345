//! Input documents and store snapshots.
//!
//! Documents ending in `.yaml` or `.yml` are read as YAML, everything else
//! as JSON. Store snapshots are always JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tokensync::store::MemoryStore;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

/// Reads and parses a JSON or YAML document.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
    }
}

/// Reads a store snapshot; a missing file is an empty store.
pub fn read_store(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    read_document(path)
}

pub fn write_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json + "\n").with_context(|| format!("cannot write {}", path.display()))
}
