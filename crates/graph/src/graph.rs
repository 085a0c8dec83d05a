//! Dependency graph over workspace package names, with precomputed
//! transitive-dependency and transitive-dependent sets.
//!
//! Edges point from a package to each workspace dependency named in its
//! `dependencies` + `peerDependencies` + `optionalDependencies` sections.
//! `devDependencies` never contributes an edge (§4.4 of the component
//! design: a dev-only reference never participates in the published graph).

use std::collections::{BTreeMap, BTreeSet};

use crate::discovery::Workspace;

/// Adjacency-list dependency graph over one workspace's package names.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// name -> direct workspace deps (the edges this package's manifest declares).
    edges: BTreeMap<String, BTreeSet<String>>,
    /// name -> packages that directly depend on it.
    reverse_edges: BTreeMap<String, BTreeSet<String>>,
    /// name -> full transitive dependency set (excludes self).
    transitive_deps: BTreeMap<String, BTreeSet<String>>,
    /// name -> full transitive dependent set (excludes self).
    transitive_dependents: BTreeMap<String, BTreeSet<String>>,
    /// Which package names are non-private (publish candidates).
    publishable: BTreeSet<String>,
}

impl DependencyGraph {
    /// Builds the graph from a discovered workspace, then precomputes
    /// transitive closures once (iterating nodes in insertion order is
    /// sufficient here since closures are memoized bottom-up via DFS with
    /// cycle-safe visited tracking, not a strict topological pass).
    #[must_use]
    pub fn build(workspace: &Workspace) -> Self {
        let names: BTreeSet<String> = workspace.packages.iter().map(|p| p.name.clone()).collect();

        let mut edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut reverse_edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut publishable = BTreeSet::new();

        for pkg in &workspace.packages {
            let mut deps = BTreeSet::new();
            for (dep_name, _range) in pkg.manifest.graph_dependencies() {
                if names.contains(dep_name) {
                    deps.insert(dep_name.to_string());
                    reverse_edges.entry(dep_name.to_string()).or_default().insert(pkg.name.clone());
                }
            }
            edges.insert(pkg.name.clone(), deps);
            if pkg.publishable() {
                publishable.insert(pkg.name.clone());
            }
        }

        for name in &names {
            edges.entry(name.clone()).or_default();
            reverse_edges.entry(name.clone()).or_default();
        }

        let mut graph = Self {
            edges,
            reverse_edges,
            transitive_deps: BTreeMap::new(),
            transitive_dependents: BTreeMap::new(),
            publishable,
        };
        graph.precompute_transitive_closures();
        graph
    }

    fn precompute_transitive_closures(&mut self) {
        let names: Vec<String> = self.edges.keys().cloned().collect();
        for name in &names {
            let set = Self::transitive_closure(&self.edges, name);
            self.transitive_deps.insert(name.clone(), set);
        }
        for name in &names {
            let set = Self::transitive_closure(&self.reverse_edges, name);
            self.transitive_dependents.insert(name.clone(), set);
        }
    }

    fn transitive_closure(edges: &BTreeMap<String, BTreeSet<String>>, start: &str) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        let mut stack = vec![start.to_string()];
        while let Some(node) = stack.pop() {
            let Some(neighbors) = edges.get(&node) else { continue };
            for neighbor in neighbors {
                if visited.insert(neighbor.clone()) {
                    stack.push(neighbor.clone());
                }
            }
        }
        visited
    }

    /// Every package name in the graph.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Direct workspace deps declared by `name`.
    #[must_use]
    pub fn direct_deps(&self, name: &str) -> BTreeSet<String> {
        self.edges.get(name).cloned().unwrap_or_default()
    }

    /// Every workspace package `name` transitively depends on (excludes self).
    #[must_use]
    pub fn transitive_deps(&self, name: &str) -> BTreeSet<String> {
        self.transitive_deps.get(name).cloned().unwrap_or_default()
    }

    /// Every workspace package that transitively depends on `name` (excludes self).
    #[must_use]
    pub fn transitive_dependents(&self, name: &str) -> BTreeSet<String> {
        self.transitive_dependents.get(name).cloned().unwrap_or_default()
    }

    /// Whether `name` is a non-private (publishable) package.
    #[must_use]
    pub fn is_publishable(&self, name: &str) -> bool {
        self.publishable.contains(name)
    }

    /// Whether `name` exists in this graph.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::WorkspacePackage;
    use crate::manifest::{Dependencies, PackageManifest};
    use std::path::PathBuf;

    fn pkg(name: &str, deps: &[&str], private: bool) -> WorkspacePackage {
        let dependencies =
            Dependencies(deps.iter().map(|d| (d.to_string(), "workspace:*".to_string())).collect());
        WorkspacePackage {
            name: name.to_string(),
            dir: PathBuf::from(format!("/ws/{name}")),
            manifest: PackageManifest {
                name: name.to_string(),
                version: "0.0.0".to_string(),
                private,
                dependencies,
                dev_dependencies: Dependencies::default(),
                peer_dependencies: Dependencies::default(),
                optional_dependencies: Dependencies::default(),
                bundled_dependencies: Vec::new(),
                files: None,
                main: None,
                module: None,
                types: None,
                workspaces: None,
                publish_config: None,
                extra: serde_json::Map::new(),
            },
        }
    }

    fn workspace(packages: Vec<WorkspacePackage>) -> Workspace {
        Workspace {
            root: PathBuf::from("/ws"),
            tool: sublime_standard_tools::node::PackageManagerKind::Npm,
            packages,
        }
    }

    #[test]
    fn transitive_deps_follow_chain() {
        let ws = workspace(vec![pkg("a", &["b"], false), pkg("b", &["c"], false), pkg("c", &[], false)]);
        let graph = DependencyGraph::build(&ws);
        let deps = graph.transitive_deps("a");
        assert!(deps.contains("b"));
        assert!(deps.contains("c"));
    }

    #[test]
    fn transitive_dependents_are_the_reverse() {
        let ws = workspace(vec![pkg("a", &["b"], false), pkg("b", &["c"], false), pkg("c", &[], false)]);
        let graph = DependencyGraph::build(&ws);
        let dependents = graph.transitive_dependents("c");
        assert!(dependents.contains("a"));
        assert!(dependents.contains("b"));
    }

    #[test]
    fn external_deps_are_not_edges() {
        let ws = workspace(vec![pkg("a", &["left-pad"], false)]);
        let graph = DependencyGraph::build(&ws);
        assert!(graph.direct_deps("a").is_empty());
    }

    #[test]
    fn private_packages_are_excluded_from_publishable() {
        let ws = workspace(vec![pkg("a", &[], true), pkg("b", &[], false)]);
        let graph = DependencyGraph::build(&ws);
        assert!(!graph.is_publishable("a"));
        assert!(graph.is_publishable("b"));
    }
}
