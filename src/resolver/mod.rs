//! Transitive component resolution.
//!
//! Given the names a user asked for and the registry index, [`resolve`]
//! computes every component that must be installed and the union of the
//! packages they need.
//!
//! The closure is a breadth-first walk over `registryDependencies` with an
//! explicit worklist and visited set. Every name enters the visited set at
//! most once, so the walk terminates on any index; cycles are then rejected
//! by a depth-first check over the visited components.
//!
//! # Example
//!
//! ```
//! use sprig::registry::RegistryIndex;
//! use sprig::resolver::resolve;
//!
//! let index = RegistryIndex::from_json(r#"{
//!     "button": {"files": ["ui/button.tsx"], "dependencies": ["clsx"]},
//!     "card": {"files": ["ui/card.tsx"], "registryDependencies": ["button"]}
//! }"#).unwrap();
//!
//! let result = resolve(&["card".to_string()], &index).unwrap();
//! assert_eq!(result.components, vec!["card", "button"]);
//! assert!(result.dependencies.contains("clsx"));
//! ```

pub mod graph;

use serde::Serialize;
use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::error::{Result, SprigError};
use crate::registry::RegistryIndex;

pub use graph::ComponentGraph;

/// Everything one install needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// Components to install, in first-discovery order.
    pub components: Vec<String>,
    /// Runtime packages.
    pub dependencies: BTreeSet<String>,
    /// Development packages.
    pub dev_dependencies: BTreeSet<String>,
    /// Tailwind plugins the components expect.
    pub tailwind_plugins: BTreeSet<String>,
}

impl ResolutionResult {
    /// Whether any package needs installing.
    pub fn has_packages(&self) -> bool {
        !self.dependencies.is_empty() || !self.dev_dependencies.is_empty()
    }
}

/// Resolve the full closure of `requested` against `index`.
///
/// # Errors
///
/// - `UnknownComponent` if a requested name, or a registry dependency of a
///   reachable component, is missing from the index. Nothing is resolved.
/// - `CyclicDependency` if the reachable components contain a cycle.
pub fn resolve(requested: &[String], index: &RegistryIndex) -> Result<ResolutionResult> {
    if let Some(missing) = requested.iter().find(|name| !index.contains(name)) {
        return Err(SprigError::UnknownComponent {
            name: missing.clone(),
        });
    }

    let components = closure(requested, index)?;

    let graph = ComponentGraph::induced(index, &components);
    if let Some(cycle) = graph.find_cycle() {
        return Err(SprigError::CyclicDependency {
            cycle: cycle.join(" -> "),
        });
    }

    let mut result = ResolutionResult {
        components,
        ..Default::default()
    };

    for name in &result.components {
        let Some(entry) = index.get(name) else {
            continue;
        };
        result
            .dependencies
            .extend(entry.dependencies.iter().cloned());
        result
            .dev_dependencies
            .extend(entry.dev_dependencies.iter().cloned());
        result
            .tailwind_plugins
            .extend(entry.tailwind_plugins().iter().cloned());
    }

    tracing::debug!(
        "Resolved {} component(s), {} package(s), {} dev package(s)",
        result.components.len(),
        result.dependencies.len(),
        result.dev_dependencies.len()
    );

    Ok(result)
}

/// Breadth-first closure in first-discovery order.
fn closure(requested: &[String], index: &RegistryIndex) -> Result<Vec<String>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut worklist: VecDeque<&str> = VecDeque::new();

    for name in requested {
        if seen.insert(name.as_str()) {
            worklist.push_back(name.as_str());
        }
    }

    while let Some(name) = worklist.pop_front() {
        let entry = index
            .get(name)
            .ok_or_else(|| SprigError::UnknownComponent {
                name: name.to_string(),
            })?;
        order.push(name.to_string());

        for dep in &entry.registry_dependencies {
            if seen.insert(dep.as_str()) {
                worklist.push_back(dep.as_str());
            }
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentEntry;
    use std::collections::BTreeMap;

    fn entry(name: &str, deps: &[&str], registry_deps: &[&str]) -> ComponentEntry {
        ComponentEntry {
            name: name.to_string(),
            files: vec![format!("ui/{}.tsx", name)],
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            registry_dependencies: registry_deps.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    fn index(entries: Vec<ComponentEntry>) -> RegistryIndex {
        let map: BTreeMap<String, ComponentEntry> =
            entries.into_iter().map(|e| (e.name.clone(), e)).collect();
        RegistryIndex::from_entries(map)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn card_pulls_in_button_and_clsx() {
        let idx = index(vec![
            entry("button", &["clsx"], &[]),
            entry("card", &[], &["button"]),
        ]);

        let result = resolve(&names(&["card"]), &idx).unwrap();

        assert_eq!(result.components, names(&["card", "button"]));
        assert_eq!(result.dependencies, BTreeSet::from(["clsx".to_string()]));
        assert!(result.dev_dependencies.is_empty());
    }

    #[test]
    fn resolution_snapshot() {
        let mut dialog = entry("dialog", &["@radix-ui/react-dialog"], &["button"]);
        dialog.dev_dependencies = BTreeSet::from(["@types/react".to_string()]);
        let idx = index(vec![
            entry("button", &["clsx"], &[]),
            dialog,
            entry("card", &["clsx"], &["button"]),
        ]);

        let result = resolve(&names(&["dialog", "card"]), &idx).unwrap();

        insta::assert_json_snapshot!(result, @r#"
        {
          "components": [
            "dialog",
            "card",
            "button"
          ],
          "dependencies": [
            "@radix-ui/react-dialog",
            "clsx"
          ],
          "devDependencies": [
            "@types/react"
          ],
          "tailwindPlugins": []
        }
        "#);
    }

    #[test]
    fn closure_contains_requested() {
        let idx = index(vec![
            entry("a", &[], &["b"]),
            entry("b", &[], &["c"]),
            entry("c", &[], &[]),
            entry("d", &[], &[]),
        ]);

        let result = resolve(&names(&["a", "d"]), &idx).unwrap();

        for name in ["a", "d"] {
            assert!(result.components.contains(&name.to_string()));
        }
        assert_eq!(result.components, names(&["a", "d", "b", "c"]));
    }

    #[test]
    fn shared_dependency_installed_once() {
        let idx = index(vec![
            entry("utils", &["clsx"], &[]),
            entry("button", &[], &["utils"]),
            entry("card", &[], &["utils", "button"]),
        ]);

        let result = resolve(&names(&["card", "button"]), &idx).unwrap();

        assert_eq!(result.components, names(&["card", "button", "utils"]));
    }

    #[test]
    fn duplicate_requests_are_collapsed() {
        let idx = index(vec![entry("button", &[], &[])]);
        let result = resolve(&names(&["button", "button"]), &idx).unwrap();
        assert_eq!(result.components, names(&["button"]));
    }

    #[test]
    fn unknown_requested_component_fails() {
        let idx = index(vec![entry("button", &[], &[])]);

        let err = resolve(&names(&["button", "carousel"]), &idx).unwrap_err();

        assert!(matches!(
            err,
            SprigError::UnknownComponent { ref name } if name == "carousel"
        ));
    }

    #[test]
    fn unknown_registry_dependency_fails() {
        let idx = index(vec![entry("card", &[], &["button"])]);

        let err = resolve(&names(&["card"]), &idx).unwrap_err();

        assert!(matches!(
            err,
            SprigError::UnknownComponent { ref name } if name == "button"
        ));
    }

    #[test]
    fn mutual_dependency_is_cyclic() {
        let idx = index(vec![entry("a", &[], &["b"]), entry("b", &[], &["a"])]);

        let err = resolve(&names(&["a"]), &idx).unwrap_err();

        assert!(matches!(
            err,
            SprigError::CyclicDependency { ref cycle } if cycle == "a -> b -> a"
        ));
    }

    #[test]
    fn self_dependency_is_cyclic() {
        let idx = index(vec![entry("a", &[], &["a"])]);
        let err = resolve(&names(&["a"]), &idx).unwrap_err();
        assert!(matches!(err, SprigError::CyclicDependency { .. }));
    }

    #[test]
    fn unreachable_cycle_is_ignored() {
        let idx = index(vec![
            entry("button", &[], &[]),
            entry("x", &[], &["y"]),
            entry("y", &[], &["x"]),
        ]);

        assert!(resolve(&names(&["button"]), &idx).is_ok());
    }

    #[test]
    fn resolution_is_deterministic() {
        let idx = index(vec![
            entry("button", &["clsx", "tailwind-merge"], &[]),
            entry("badge", &["clsx"], &[]),
            entry("card", &["react"], &["button", "badge"]),
        ]);
        let request = names(&["card"]);

        let first = resolve(&request, &idx).unwrap();
        let second = resolve(&request, &idx).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.components, names(&["card", "badge", "button"]));
    }

    #[test]
    fn tailwind_plugins_are_aggregated() {
        let mut card = entry("card", &[], &[]);
        card.tailwind = Some(crate::registry::TailwindMeta {
            config: crate::registry::index::TailwindConfigMeta {
                plugins: vec!["tailwindcss-animate".to_string()],
            },
        });
        let idx = index(vec![card]);

        let result = resolve(&names(&["card"]), &idx).unwrap();

        assert!(result.tailwind_plugins.contains("tailwindcss-animate"));
    }

    #[test]
    fn empty_request_resolves_nothing() {
        let idx = index(vec![entry("button", &["clsx"], &[])]);
        let result = resolve(&[], &idx).unwrap();
        assert!(result.components.is_empty());
        assert!(!result.has_packages());
    }
}
