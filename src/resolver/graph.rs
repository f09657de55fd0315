//! Component dependency graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::registry::RegistryIndex;

/// Edges between components, restricted to a set of names.
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    /// Component name to the components it depends on.
    dependencies: BTreeMap<String, BTreeSet<String>>,
    /// Names in the order they should be visited.
    order: Vec<String>,
}

impl ComponentGraph {
    /// Build the graph induced by `names` over the index.
    ///
    /// Only edges whose target is also in `names` are kept.
    pub fn induced(index: &RegistryIndex, names: &[String]) -> Self {
        let members: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let dependencies = names
            .iter()
            .map(|name| {
                let deps = index
                    .get(name)
                    .map(|entry| {
                        entry
                            .registry_dependencies
                            .iter()
                            .filter(|d| members.contains(d.as_str()))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                (name.clone(), deps)
            })
            .collect();

        Self {
            dependencies,
            order: names.to_vec(),
        }
    }

    /// Get the direct dependencies of a component.
    pub fn dependencies_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(name)
    }

    /// Find a cycle in the graph, returning the path if one exists.
    ///
    /// The returned path starts and ends with the same component, e.g.
    /// `["a", "b", "a"]`. A self-loop is reported as `["a", "a"]`.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        fn dfs<'a>(
            node: &'a str,
            graph: &'a ComponentGraph,
            state: &mut HashMap<&'a str, State>,
            path: &mut Vec<&'a str>,
        ) -> Option<Vec<String>> {
            state.insert(node, State::Visiting);
            path.push(node);

            if let Some(deps) = graph.dependencies.get(node) {
                for dep in deps {
                    match state.get(dep.as_str()) {
                        Some(State::Visiting) => {
                            let start = path.iter().position(|s| *s == dep.as_str())?;
                            let mut cycle: Vec<String> =
                                path[start..].iter().map(|s| s.to_string()).collect();
                            cycle.push(dep.clone());
                            return Some(cycle);
                        }
                        Some(State::Unvisited) | None => {
                            if let Some(cycle) = dfs(dep, graph, state, path) {
                                return Some(cycle);
                            }
                        }
                        Some(State::Visited) => {}
                    }
                }
            }

            path.pop();
            state.insert(node, State::Visited);
            None
        }

        let mut state: HashMap<&str, State> = self
            .order
            .iter()
            .map(|s| (s.as_str(), State::Unvisited))
            .collect();
        let mut path = Vec::new();

        for name in &self.order {
            if state.get(name.as_str()) == Some(&State::Unvisited) {
                if let Some(cycle) = dfs(name, self, &mut state, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentEntry;

    fn index(edges: &[(&str, &[&str])]) -> RegistryIndex {
        let entries = edges
            .iter()
            .map(|(name, deps)| {
                (
                    name.to_string(),
                    ComponentEntry {
                        name: name.to_string(),
                        registry_dependencies: deps.iter().map(|d| d.to_string()).collect(),
                        ..Default::default()
                    },
                )
            })
            .collect();
        RegistryIndex::from_entries(entries)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let idx = index(&[("card", &["button"]), ("button", &[])]);
        let graph = ComponentGraph::induced(&idx, &names(&["card", "button"]));
        assert!(graph.find_cycle().is_none());
    }

    #[test]
    fn finds_two_node_cycle() {
        let idx = index(&[("a", &["b"]), ("b", &["a"])]);
        let graph = ComponentGraph::induced(&idx, &names(&["a", "b"]));
        assert_eq!(graph.find_cycle(), Some(names(&["a", "b", "a"])));
    }

    #[test]
    fn finds_self_loop() {
        let idx = index(&[("a", &["a"])]);
        let graph = ComponentGraph::induced(&idx, &names(&["a"]));
        assert_eq!(graph.find_cycle(), Some(names(&["a", "a"])));
    }

    #[test]
    fn cycle_path_excludes_entry_prefix() {
        let idx = index(&[("root", &["a"]), ("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let graph = ComponentGraph::induced(&idx, &names(&["root", "a", "b", "c"]));
        assert_eq!(graph.find_cycle(), Some(names(&["a", "b", "c", "a"])));
    }

    #[test]
    fn edges_outside_members_are_dropped() {
        let idx = index(&[("card", &["button"]), ("button", &[])]);
        let graph = ComponentGraph::induced(&idx, &names(&["card"]));
        assert!(graph.dependencies_of("card").unwrap().is_empty());
    }
}
