//! Registry index model.
//!
//! The index is a JSON object keyed by component name. Each value describes
//! the component's files and the packages and components it depends on.
//! Unknown fields are ignored so older clients keep working against newer
//! registries.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, SprigError};

/// Kind of registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ComponentKind {
    /// A UI component offered for selection.
    #[serde(rename = "components:ui", alias = "registry:ui")]
    Ui,
    /// Any other entry (helpers, hooks, libs).
    #[default]
    #[serde(rename = "other", other)]
    Other,
}

/// Tailwind configuration a component expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TailwindMeta {
    #[serde(default)]
    pub config: TailwindConfigMeta,
}

/// The `config` block of [`TailwindMeta`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TailwindConfigMeta {
    /// Tailwind plugins the component relies on.
    #[serde(default)]
    pub plugins: Vec<String>,
}

/// A single component described by the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEntry {
    /// Component name. Defaults to the index key when omitted.
    #[serde(default)]
    pub name: String,

    /// Entry kind.
    #[serde(rename = "type", default)]
    pub kind: ComponentKind,

    /// Source file identifiers, in install order.
    #[serde(default)]
    pub files: Vec<String>,

    /// Runtime package dependencies.
    #[serde(default)]
    pub dependencies: BTreeSet<String>,

    /// Development package dependencies.
    #[serde(default)]
    pub dev_dependencies: BTreeSet<String>,

    /// Other registry components this one needs.
    #[serde(default)]
    pub registry_dependencies: BTreeSet<String>,

    /// Optional tailwind metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailwind: Option<TailwindMeta>,
}

impl ComponentEntry {
    /// Whether this entry is offered as a selectable UI component.
    pub fn is_ui(&self) -> bool {
        self.kind == ComponentKind::Ui
    }

    /// Tailwind plugins declared by this component.
    pub fn tailwind_plugins(&self) -> &[String] {
        self.tailwind
            .as_ref()
            .map(|t| t.config.plugins.as_slice())
            .unwrap_or(&[])
    }
}

/// The registry catalog, mapping component names to entries.
///
/// Backed by an ordered map, so iteration order never depends on how the
/// JSON object happened to be laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryIndex {
    entries: BTreeMap<String, ComponentEntry>,
}

impl RegistryIndex {
    /// Parse an index from its JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, ComponentEntry> =
            serde_json::from_str(content).map_err(|e| SprigError::RegistryUnavailable {
                resource: "registry.json".to_string(),
                reason: format!("invalid registry index: {}", e),
            })?;

        Ok(Self::from_entries(raw))
    }

    /// Build an index from already-parsed entries.
    ///
    /// Entries without a name take their key. An entry whose name disagrees
    /// with its key is stored under the key.
    pub fn from_entries(entries: BTreeMap<String, ComponentEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, mut entry)| {
                if entry.name.is_empty() {
                    entry.name = key.clone();
                } else if entry.name != key {
                    tracing::warn!(
                        "Registry entry '{}' declares name '{}'; using the key",
                        key,
                        entry.name
                    );
                    entry.name = key.clone();
                }
                (key, entry)
            })
            .collect();

        Self { entries }
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&ComponentEntry> {
        self.entries.get(name)
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentEntry> {
        self.entries.values()
    }

    /// Names of selectable UI components, sorted.
    pub fn ui_component_names(&self) -> Vec<String> {
        self.entries
            .values()
            .filter(|e| e.is_ui())
            .map(|e| e.name.clone())
            .collect()
    }
}
