//! Publish plan construction: turning a cascade order into a concrete,
//! versioned set of tarballs to build and publish.
//!
//! Every package in a single publish shares one synthetic version (the
//! cascade is "all or nothing" at the version level, even though execution
//! can still partially fail and roll back). `rewrittenDeps` is computed once
//! per entry so tarball staging never has to re-walk the dependency graph.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sublime_graph_tools::manifest::Dependencies;
use sublime_graph_tools::{DependencyGraph, Workspace};

const WORKSPACE_PROTOCOL_PREFIX: &str = "workspace:";

/// One package's share of a publish plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishEntry {
    /// Package name.
    pub name: String,
    /// Absolute directory of the package's source tree.
    pub dir: PathBuf,
    /// The shared synthetic version this entry publishes as.
    pub version: String,
    /// Workspace dep name to rewritten (exact) version, covering every name
    /// that appears in `dependencies`/`peerDependencies`/`optionalDependencies`
    /// and is itself part of this plan.
    pub rewritten_deps: BTreeMap<String, String>,
}

/// A complete, ready-to-execute publish plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishPlan {
    /// Millisecond timestamp every entry's version was synthesized from.
    pub timestamp: u64,
    /// One entry per package in cascade order.
    pub packages: Vec<PublishEntry>,
    /// pnpm catalog name to the set of plan package names declared under it,
    /// discovered from `pnpm-workspace.yaml`; empty when the workspace
    /// doesn't use catalogs. Consumers rewrite each listed package's catalog
    /// entry to the plan's shared version.
    pub catalogs: BTreeMap<String, BTreeSet<String>>,
}

impl PublishPlan {
    /// The single version every entry in this plan publishes as, or `None`
    /// if the plan has no entries.
    #[must_use]
    pub fn shared_version(&self) -> Option<&str> {
        self.packages.first().map(|e| e.version.as_str())
    }
}

fn rewritten_deps_for(deps: &Dependencies, in_scope: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    deps.0
        .keys()
        .filter_map(|name| in_scope.get(name).map(|version| (name.clone(), version.clone())))
        .collect()
}

/// Builds a [`PublishPlan`] for `order` (a cascade's deterministic publish
/// order) against `workspace`, stamping every entry with `version`.
///
/// Packages in `order` that aren't found in `workspace` are skipped; callers
/// are expected to have derived `order` from a graph built over the same
/// workspace, so this should never happen in practice.
#[must_use]
pub fn build_plan(workspace: &Workspace, _graph: &DependencyGraph, order: &[String], version: &str, timestamp: u64) -> PublishPlan {
    let in_scope: BTreeMap<String, String> =
        order.iter().map(|name| (name.clone(), version.to_string())).collect();

    let by_name: BTreeMap<&str, &sublime_graph_tools::WorkspacePackage> =
        workspace.packages.iter().map(|p| (p.name.as_str(), p)).collect();

    let mut packages = Vec::with_capacity(order.len());
    for name in order {
        let Some(pkg) = by_name.get(name.as_str()) else { continue };
        let mut rewritten_deps = rewritten_deps_for(&pkg.manifest.dependencies, &in_scope);
        rewritten_deps.extend(rewritten_deps_for(&pkg.manifest.peer_dependencies, &in_scope));
        rewritten_deps.extend(rewritten_deps_for(&pkg.manifest.optional_dependencies, &in_scope));

        packages.push(PublishEntry {
            name: pkg.name.clone(),
            dir: pkg.dir.clone(),
            version: version.to_string(),
            rewritten_deps,
        });
    }

    let catalogs = discover_catalogs(workspace, &in_scope);

    PublishPlan { timestamp, packages, catalogs }
}

#[derive(Debug, Deserialize)]
struct PnpmWorkspaceCatalogs {
    #[serde(default)]
    catalog: BTreeMap<String, String>,
    #[serde(default)]
    catalogs: BTreeMap<String, BTreeMap<String, String>>,
}

/// Reads `pnpm-workspace.yaml` at the workspace root (if any) and returns,
/// for each catalog name, the subset of `in_scope` package names it lists —
/// the set the consumer sync engine will need to rewrite once this plan
/// publishes.
fn discover_catalogs(workspace: &Workspace, in_scope: &BTreeMap<String, String>) -> BTreeMap<String, BTreeSet<String>> {
    let path = workspace.root.join("pnpm-workspace.yaml");
    let Ok(source) = std::fs::read_to_string(&path) else { return BTreeMap::new() };
    let Ok(parsed) = serde_yaml::from_str::<PnpmWorkspaceCatalogs>(&source) else { return BTreeMap::new() };

    let mut catalogs: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    let default_members: BTreeSet<String> =
        parsed.catalog.keys().filter(|name| in_scope.contains_key(*name)).cloned().collect();
    if !default_members.is_empty() {
        catalogs.insert("default".to_string(), default_members);
    }

    for (catalog_name, entries) in &parsed.catalogs {
        let members: BTreeSet<String> =
            entries.keys().filter(|name| in_scope.contains_key(*name)).cloned().collect();
        if !members.is_empty() {
            catalogs.insert(catalog_name.clone(), members);
        }
    }

    catalogs
}

/// Rewrites one manifest's dependency sections in place for staging: every
/// workspace dep this entry names gets its exact rewritten version (whether
/// it was previously a `workspace:*` range or something else); `devDependencies`
/// have any `workspace:` protocol prefix stripped to whatever bare version the
/// range otherwise carried, since a staged tarball is never installed as a
/// dev dependency of itself.
pub fn apply_rewrites(manifest: &mut sublime_graph_tools::manifest::PackageManifest, entry: &PublishEntry) {
    manifest.version = entry.version.clone();

    for section in
        [&mut manifest.dependencies, &mut manifest.peer_dependencies, &mut manifest.optional_dependencies]
    {
        for (name, range) in &mut section.0 {
            if let Some(version) = entry.rewritten_deps.get(name) {
                *range = version.clone();
            } else if let Some(stripped) = range.strip_prefix(WORKSPACE_PROTOCOL_PREFIX) {
                *range = stripped.to_string();
            }
        }
    }

    for (_, range) in &mut manifest.dev_dependencies.0 {
        if let Some(stripped) = range.strip_prefix(WORKSPACE_PROTOCOL_PREFIX) {
            *range = stripped.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sublime_graph_tools::manifest::PackageManifest;
    use sublime_graph_tools::WorkspacePackage;
    use sublime_standard_tools::node::PackageManagerKind;

    fn pkg(name: &str, deps: &[&str]) -> WorkspacePackage {
        let dependencies =
            Dependencies(deps.iter().map(|d| (d.to_string(), "workspace:*".to_string())).collect());
        WorkspacePackage {
            name: name.to_string(),
            dir: PathBuf::from(format!("/ws/{name}")),
            manifest: PackageManifest {
                name: name.to_string(),
                version: "0.0.0".to_string(),
                private: false,
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
        Workspace { root: PathBuf::from("/ws"), tool: PackageManagerKind::Npm, packages }
    }

    #[test]
    fn rewrites_workspace_deps_to_shared_version() {
        let ws = workspace(vec![pkg("a", &["b"]), pkg("b", &[])]);
        let graph = DependencyGraph::build(&ws);
        let order = vec!["b".to_string(), "a".to_string()];

        let plan = build_plan(&ws, &graph, &order, "0.0.0-pkglab.42", 42);
        let a = plan.packages.iter().find(|e| e.name == "a").expect("a present");
        assert_eq!(a.rewritten_deps.get("b"), Some(&"0.0.0-pkglab.42".to_string()));
        assert_eq!(a.version, "0.0.0-pkglab.42");
    }

    #[test]
    fn apply_rewrites_updates_manifest_in_place() {
        let ws = workspace(vec![pkg("a", &["b"]), pkg("b", &[])]);
        let graph = DependencyGraph::build(&ws);
        let order = vec!["b".to_string(), "a".to_string()];
        let plan = build_plan(&ws, &graph, &order, "0.0.0-pkglab.1", 1);
        let entry = plan.packages.iter().find(|e| e.name == "a").expect("a present").clone();

        let mut manifest = ws.packages.iter().find(|p| p.name == "a").expect("a").manifest.clone();
        apply_rewrites(&mut manifest, &entry);

        assert_eq!(manifest.version, "0.0.0-pkglab.1");
        assert_eq!(manifest.dependencies.0.get("b"), Some(&"0.0.0-pkglab.1".to_string()));
    }

    #[test]
    fn no_catalogs_when_pnpm_workspace_file_absent() {
        let ws = workspace(vec![pkg("a", &[])]);
        let graph = DependencyGraph::build(&ws);
        let order = vec!["a".to_string()];
        let plan = build_plan(&ws, &graph, &order, "0.0.0-pkglab.1", 1);
        assert!(plan.catalogs.is_empty());
    }
}
