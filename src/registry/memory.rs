//! In-memory registry for testing.
//!
//! `MemoryRegistry` implements [`RegistrySource`] over a fixed index and a
//! map of artifact contents, and records which artifacts were requested.
//!
//! # Example
//!
//! ```
//! use sprig::registry::{ComponentEntry, MemoryRegistry, RegistrySource};
//!
//! let registry = MemoryRegistry::new()
//!     .with_component(ComponentEntry {
//!         name: "button".to_string(),
//!         files: vec!["ui/button.tsx".to_string()],
//!         ..Default::default()
//!     })
//!     .with_artifact("ui/button.tsx", "export function Button() {}");
//!
//! let index = registry.fetch_index().unwrap();
//! assert!(index.contains("button"));
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, SprigError};

use super::{ComponentEntry, RegistryIndex, RegistrySource};

/// Registry backed by in-memory data.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: BTreeMap<String, ComponentEntry>,
    artifacts: HashMap<String, String>,
    unavailable: bool,
    requested: RefCell<Vec<String>>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component entry.
    pub fn with_component(mut self, entry: ComponentEntry) -> Self {
        self.entries.insert(entry.name.clone(), entry);
        self
    }

    /// Add an artifact's content.
    pub fn with_artifact(mut self, file_id: &str, content: &str) -> Self {
        self.artifacts
            .insert(file_id.to_string(), content.to_string());
        self
    }

    /// Make every fetch fail, as if the network were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Artifacts requested so far, in order.
    pub fn requested_artifacts(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl RegistrySource for MemoryRegistry {
    fn fetch_index(&self) -> Result<RegistryIndex> {
        if self.unavailable {
            return Err(SprigError::RegistryUnavailable {
                resource: "registry.json".to_string(),
                reason: "registry offline".to_string(),
            });
        }
        Ok(RegistryIndex::from_entries(self.entries.clone()))
    }

    fn fetch_artifact(&self, file_id: &str) -> Result<String> {
        self.requested.borrow_mut().push(file_id.to_string());
        if self.unavailable {
            return Err(SprigError::RegistryUnavailable {
                resource: file_id.to_string(),
                reason: "registry offline".to_string(),
            });
        }
        self.artifacts
            .get(file_id)
            .cloned()
            .ok_or_else(|| SprigError::RegistryUnavailable {
                resource: file_id.to_string(),
                reason: "not found".to_string(),
            })
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
